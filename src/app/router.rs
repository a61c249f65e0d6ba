//! View stack with one independently owned screen per route.
//!
//! The stack always starts with [`ViewRoute::Home`] and can never be popped
//! empty. Each route's [`RouteScreen`] (coordinator, result store and form
//! inputs) is created the first time the route is mounted and kept afterwards,
//! so switching views never re-fetches the other view's data.

use super::coordinator::{SearchCoordinator, SearchOutcome};
use super::modes::ViewRoute;
use crate::api::{ApiTransport, Cedulas, Receipts, ResourceDomain, ServiceUrl};
use crate::domain::error::{RecibosError, Result};
use crate::domain::{CanonicalDate, DateRange, SearchCriteria};
use chrono::FixedOffset;
use std::sync::Arc;

/// Editable filter inputs of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub range: DateRange,
    pub name: String,
}

impl SearchForm {
    #[must_use]
    pub const fn new(range: DateRange) -> Self {
        Self {
            range,
            name: String::new(),
        }
    }

    /// Criteria as currently entered; a blank name means no filter.
    #[must_use]
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new(self.range, Some(&self.name))
    }
}

/// Everything one route owns.
#[derive(Debug)]
pub struct RouteScreen<D: ResourceDomain> {
    pub coordinator: SearchCoordinator<D>,
    pub form: SearchForm,
    /// Last user-facing message for this screen.
    pub notice: Option<String>,
}

impl<D: ResourceDomain> RouteScreen<D> {
    fn new(coordinator: SearchCoordinator<D>, today: CanonicalDate) -> Self {
        Self {
            coordinator,
            form: SearchForm::new(DateRange::single_day(today)),
            notice: None,
        }
    }
}

/// Shared ingredients for mounting screens.
#[derive(Clone)]
struct ScreenFactory {
    transport: Arc<dyn ApiTransport>,
    service: ServiceUrl,
    page_size: usize,
    time_zone: FixedOffset,
}

impl ScreenFactory {
    fn mount<D: ResourceDomain>(&self, domain: D) -> RouteScreen<D> {
        let coordinator = SearchCoordinator::new(
            domain,
            Arc::clone(&self.transport),
            self.service.clone(),
            self.page_size,
        );
        RouteScreen::new(coordinator, CanonicalDate::today(self.time_zone))
    }
}

/// Stack of routes plus the screens behind them.
pub struct ViewRouter {
    stack: Vec<ViewRoute>,
    home: RouteScreen<Receipts>,
    cedulas: Option<RouteScreen<Cedulas>>,
    factory: ScreenFactory,
}

impl std::fmt::Debug for ViewRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRouter")
            .field("stack", &self.stack)
            .field("home", &self.home)
            .field("cedulas", &self.cedulas)
            .finish_non_exhaustive()
    }
}

impl ViewRouter {
    /// Creates the router with `home` mounted and on the stack.
    #[must_use]
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        service: ServiceUrl,
        page_size: usize,
        time_zone: FixedOffset,
    ) -> Self {
        let factory = ScreenFactory {
            transport,
            service,
            page_size,
            time_zone,
        };
        Self {
            stack: vec![ViewRoute::Home],
            home: factory.mount(Receipts),
            cedulas: None,
            factory,
        }
    }

    /// Top of the stack.
    #[must_use]
    pub fn current(&self) -> ViewRoute {
        self.stack.last().copied().unwrap_or(ViewRoute::Home)
    }

    #[must_use]
    pub fn stack(&self) -> &[ViewRoute] {
        &self.stack
    }

    /// Pushes `route` unless it is already on top.
    ///
    /// Returns `true` when the route's screen was mounted by this call; the
    /// caller then runs that screen's initial load.
    pub fn push(&mut self, route: ViewRoute) -> bool {
        let _span = tracing::debug_span!("router_push", route = %route, depth = self.stack.len()).entered();

        if self.current() != route {
            self.stack.push(route);
        }

        let mounted = match route {
            ViewRoute::Home => false,
            ViewRoute::Cedulas if self.cedulas.is_none() => {
                self.cedulas = Some(self.factory.mount(Cedulas));
                true
            }
            ViewRoute::Cedulas => false,
        };

        tracing::debug!(stack = ?self.stack, mounted, "route pushed");
        mounted
    }

    /// Pops the top route and returns the new current one.
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::NoParentRoute`] when only `home` is left; the
    /// stack is unchanged.
    pub fn pop(&mut self) -> Result<ViewRoute> {
        if self.stack.len() <= 1 {
            tracing::debug!("refusing to pop the root route");
            return Err(RecibosError::NoParentRoute);
        }
        let popped = self.stack.pop();
        let current = self.current();
        tracing::debug!(popped = ?popped, current = %current, "route popped");
        Ok(current)
    }

    #[must_use]
    pub const fn home(&self) -> &RouteScreen<Receipts> {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut RouteScreen<Receipts> {
        &mut self.home
    }

    #[must_use]
    pub const fn cedulas(&self) -> Option<&RouteScreen<Cedulas>> {
        self.cedulas.as_ref()
    }

    pub fn cedulas_mut(&mut self) -> Option<&mut RouteScreen<Cedulas>> {
        self.cedulas.as_mut()
    }

    /// Form of the screen behind `route`, if mounted.
    pub fn form_mut(&mut self, route: ViewRoute) -> Option<&mut SearchForm> {
        match route {
            ViewRoute::Home => Some(&mut self.home.form),
            ViewRoute::Cedulas => self.cedulas.as_mut().map(|s| &mut s.form),
        }
    }

    #[must_use]
    pub fn form(&self, route: ViewRoute) -> Option<&SearchForm> {
        match route {
            ViewRoute::Home => Some(&self.home.form),
            ViewRoute::Cedulas => self.cedulas.as_ref().map(|s| &s.form),
        }
    }

    /// Sets the notice of the screen behind `route`.
    pub fn set_notice(&mut self, route: ViewRoute, notice: Option<String>) {
        match route {
            ViewRoute::Home => self.home.notice = notice,
            ViewRoute::Cedulas => {
                if let Some(screen) = self.cedulas.as_mut() {
                    screen.notice = notice;
                }
            }
        }
    }

    #[must_use]
    pub fn notice(&self, route: ViewRoute) -> Option<&str> {
        match route {
            ViewRoute::Home => self.home.notice.as_deref(),
            ViewRoute::Cedulas => self.cedulas.as_ref().and_then(|s| s.notice.as_deref()),
        }
    }

    /// Runs a search on the screen behind `route`. `None` if it is not mounted.
    pub async fn search(&self, route: ViewRoute, criteria: &SearchCriteria) -> Option<SearchOutcome> {
        match route {
            ViewRoute::Home => Some(self.home.coordinator.search(criteria).await),
            ViewRoute::Cedulas => match &self.cedulas {
                Some(screen) => Some(screen.coordinator.search(criteria).await),
                None => None,
            },
        }
    }

    /// Report URL for `route` with `criteria`. `None` if it is not mounted.
    #[must_use]
    pub fn report_url(&self, route: ViewRoute, criteria: &SearchCriteria) -> Option<String> {
        match route {
            ViewRoute::Home => Some(self.home.coordinator.build_report_url(criteria)),
            ViewRoute::Cedulas => self
                .cedulas
                .as_ref()
                .map(|s| s.coordinator.build_report_url(criteria)),
        }
    }

    /// Moves the page of `route`'s results. Returns whether the page changed.
    pub fn turn_page(&self, route: ViewRoute, forward: bool) -> bool {
        match (route, forward) {
            (ViewRoute::Home, true) => self.home.coordinator.next_page(),
            (ViewRoute::Home, false) => self.home.coordinator.previous_page(),
            (ViewRoute::Cedulas, forward) => self.cedulas.as_ref().is_some_and(|s| {
                if forward {
                    s.coordinator.next_page()
                } else {
                    s.coordinator.previous_page()
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{receipt_json, receipt_totals_json, service, ScriptedTransport};
    use serde_json::json;

    fn router(transport: Arc<ScriptedTransport>) -> ViewRouter {
        ViewRouter::new(transport, service(), 100, FixedOffset::west_opt(6 * 3600).unwrap())
    }

    #[test]
    fn starts_at_home_and_refuses_to_pop_it() {
        let mut router = router(Arc::new(ScriptedTransport::new()));
        assert_eq!(router.stack(), &[ViewRoute::Home]);
        assert!(router.cedulas().is_none());
        assert!(matches!(router.pop(), Err(RecibosError::NoParentRoute)));
        assert_eq!(router.stack(), &[ViewRoute::Home]);
    }

    #[test]
    fn push_pop_then_second_pop_fails_at_home() {
        let mut router = router(Arc::new(ScriptedTransport::new()));

        router.push(ViewRoute::Cedulas);
        assert_eq!(router.stack(), &[ViewRoute::Home, ViewRoute::Cedulas]);
        assert_eq!(router.current(), ViewRoute::Cedulas);

        assert_eq!(router.pop().unwrap(), ViewRoute::Home);
        assert_eq!(router.stack(), &[ViewRoute::Home]);

        assert!(matches!(router.pop(), Err(RecibosError::NoParentRoute)));
        assert_eq!(router.stack(), &[ViewRoute::Home]);
        assert_eq!(router.current(), ViewRoute::Home);
    }

    #[test]
    fn cedulas_is_mounted_once() {
        let mut router = router(Arc::new(ScriptedTransport::new()));

        assert!(router.push(ViewRoute::Cedulas));
        assert!(!router.push(ViewRoute::Cedulas));
        assert_eq!(router.stack(), &[ViewRoute::Home, ViewRoute::Cedulas]);

        if let Some(form) = router.form_mut(ViewRoute::Cedulas) {
            form.name = "Acme".into();
        }
        assert_eq!(router.pop().unwrap(), ViewRoute::Home);
        assert!(!router.push(ViewRoute::Cedulas));
        assert_eq!(router.form(ViewRoute::Cedulas).map(|f| f.name.as_str()), Some("Acme"));
    }

    #[test]
    fn unmounted_route_has_no_screen() {
        let router = router(Arc::new(ScriptedTransport::new()));
        assert!(router.form(ViewRoute::Cedulas).is_none());
        assert!(router.notice(ViewRoute::Cedulas).is_none());
        assert!(!router.turn_page(ViewRoute::Cedulas, true));
        assert!(router.report_url(ViewRoute::Cedulas, &router.home().form.criteria()).is_none());
    }

    #[tokio::test]
    async fn screens_keep_independent_results() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos", json!([receipt_json(1, "Juan", 10, "0"), receipt_json(2, "Ana", 5, "0")]))
            .reply("recibos/totales", receipt_totals_json(15, 0, 0))
            .reply("cedulas", json!([]));
        let mut router = router(transport);
        let criteria = router.home().form.criteria();

        router.search(ViewRoute::Home, &criteria).await;
        router.push(ViewRoute::Cedulas);
        let outcome = router.search(ViewRoute::Cedulas, &criteria).await;

        assert!(matches!(outcome, Some(SearchOutcome::Empty { .. })));
        assert_eq!(router.home().coordinator.snapshot().total_items, 2);
        assert_eq!(router.cedulas().map(|s| s.coordinator.snapshot().total_items), Some(0));
    }
}
