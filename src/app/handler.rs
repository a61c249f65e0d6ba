//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow:
//!
//! 1. The front end turns user input into an [`Event`]
//! 2. [`handle_event`] mutates [`AppState`] and returns [`Action`]s
//! 3. The front end executes the actions (network, browser) and reports the
//!    results back as further events
//!
//! The handler itself never awaits. Searches run outside it and come back as
//! [`Event::SearchFinished`].
//!
//! # Event Types
//!
//! - **Form**: `SetFrom`, `SetTo`, `SetName`
//! - **Search**: `Start`, `Search`, `SearchFinished`
//! - **Paging**: `NextPage`, `PrevPage`
//! - **Navigation**: `Navigate`, `Back`
//! - **Extras**: `OpenReport`, `ShowBreakdown`, `BreakdownLoaded`, `BreakdownFailed`
//! - **System**: `Quit`

use super::actions::Action;
use super::coordinator::{SearchOutcome, FAILED_NOTICE};
use super::modes::ViewRoute;
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{AccountTotals, CanonicalDate};

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Application started; runs the initial load of `home`.
    Start,

    /// New start date for the current view, in any accepted display format.
    SetFrom(String),
    /// New end date for the current view.
    SetTo(String),
    /// New payer-name filter; blank clears it.
    SetName(String),

    /// Search the current view with its form inputs.
    Search,
    /// A search issued by [`Action::RunSearch`] settled.
    SearchFinished {
        route: ViewRoute,
        outcome: SearchOutcome,
    },

    NextPage,
    PrevPage,

    /// Push a route; the first visit triggers its initial load.
    Navigate(ViewRoute),
    /// Pop the current route.
    Back,

    /// Build the report URL of the current view.
    OpenReport,
    /// Request the per-account breakdown (receipts view only).
    ShowBreakdown,
    BreakdownLoaded {
        rows: Vec<AccountTotals>,
    },
    BreakdownFailed {
        message: String,
    },

    Quit,
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The `bool` tells the caller whether the screen needs a re-render.
///
/// # Errors
///
/// - [`RecibosError::MalformedDate`](crate::RecibosError::MalformedDate) when a
///   date input cannot be parsed; the form is left unchanged
/// - [`RecibosError::NoParentRoute`](crate::RecibosError::NoParentRoute) on
///   `Back` from the receipts view
///
/// # Example
///
/// ```no_run
/// use recibos::{handle_event, initialize, Action, Config, Event};
///
/// let mut state = initialize(&Config::default())?;
/// let (_, actions) = handle_event(&mut state, &Event::Start)?;
/// assert!(matches!(actions[..], [Action::RunSearch { .. }]));
/// # Ok::<(), recibos::RecibosError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let route = state.router.current();

    match event {
        Event::Start => Ok((true, search_action(state, ViewRoute::Home).into_iter().collect())),
        Event::SetFrom(input) | Event::SetTo(input) => {
            let date = CanonicalDate::parse_display(input)?;
            if let Some(form) = state.router.form_mut(route) {
                if matches!(event, Event::SetFrom(_)) {
                    form.range.from = date;
                } else {
                    form.range.to = date;
                }
                tracing::debug!(route = %route, range = %form.range.to_display(), "date range updated");
            }
            Ok((true, vec![]))
        }
        Event::SetName(name) => {
            if let Some(form) = state.router.form_mut(route) {
                form.name = name.trim().to_string();
            }
            Ok((true, vec![]))
        }
        Event::Search => {
            if route == ViewRoute::Home {
                state.breakdown = None;
            }
            Ok((true, search_action(state, route).into_iter().collect()))
        }
        Event::SearchFinished { route, outcome } => {
            tracing::debug!(route = %route, outcome = ?outcome, "search finished");
            match outcome {
                SearchOutcome::Superseded => Ok((false, vec![])),
                SearchOutcome::Populated { .. } => {
                    state.router.set_notice(*route, None);
                    Ok((true, vec![]))
                }
                SearchOutcome::Empty { notice } | SearchOutcome::Failed { notice } => {
                    state.router.set_notice(*route, Some(notice.clone()));
                    Ok((true, vec![]))
                }
            }
        }
        Event::NextPage => Ok((state.router.turn_page(route, true), vec![])),
        Event::PrevPage => Ok((state.router.turn_page(route, false), vec![])),
        Event::Navigate(target) => {
            let mounted = state.router.push(*target);
            let actions = if mounted {
                tracing::debug!(route = %target, "first visit, running initial load");
                search_action(state, *target).into_iter().collect()
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::Back => {
            let current = state.router.pop()?;
            tracing::debug!(current = %current, "navigated back");
            Ok((true, vec![]))
        }
        Event::OpenReport => {
            let Some(form) = state.router.form(route) else {
                return Ok((false, vec![]));
            };
            let criteria = form.criteria();
            Ok((
                false,
                state
                    .router
                    .report_url(route, &criteria)
                    .map(|url| Action::OpenReport { url })
                    .into_iter()
                    .collect(),
            ))
        }
        Event::ShowBreakdown => {
            if route != ViewRoute::Home {
                tracing::debug!(route = %route, "breakdown only exists for receipts");
                return Ok((false, vec![]));
            }
            let range = state.router.home().form.range;
            Ok((false, vec![Action::FetchBreakdown { range }]))
        }
        Event::BreakdownLoaded { rows } => {
            tracing::debug!(accounts = rows.len(), "breakdown loaded");
            state.breakdown = Some(rows.clone());
            Ok((route == ViewRoute::Home, vec![]))
        }
        Event::BreakdownFailed { message } => {
            tracing::warn!(error = %message, "breakdown request failed");
            state.router.set_notice(ViewRoute::Home, Some(FAILED_NOTICE.to_string()));
            Ok((route == ViewRoute::Home, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// `RunSearch` for `route` with its current form, if the route is mounted.
fn search_action(state: &AppState, route: ViewRoute) -> Option<Action> {
    let criteria = state.router.form(route)?.criteria();
    tracing::debug!(route = %route, criteria = %criteria.describe(), "search requested");
    Some(Action::RunSearch { route, criteria })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{receipt_json, receipt_totals_json, ScriptedTransport};
    use crate::domain::{DateRange, SearchCriteria};
    use crate::{initialize_with, Config, RecibosError};
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(transport: ScriptedTransport) -> AppState {
        initialize_with(&Config::default(), Arc::new(transport)).unwrap()
    }

    fn state() -> AppState {
        state_with(ScriptedTransport::new())
    }

    /// Runs every `RunSearch` in `actions` and feeds the outcomes back.
    async fn settle(state: &mut AppState, actions: Vec<Action>) {
        for action in actions {
            if let Action::RunSearch { route, criteria } = action {
                if let Some(outcome) = state.router.search(route, &criteria).await {
                    handle_event(state, &Event::SearchFinished { route, outcome }).unwrap();
                }
            }
        }
    }

    #[test]
    fn start_loads_todays_receipts() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(render);

        let today = CanonicalDate::today(state.config.time_zone().unwrap());
        assert_eq!(
            actions,
            vec![Action::RunSearch {
                route: ViewRoute::Home,
                criteria: SearchCriteria::unfiltered(DateRange::single_day(today)),
            }]
        );
    }

    #[test]
    fn malformed_date_leaves_form_unchanged() {
        let mut state = state();
        let before = state.router.home().form.clone();

        let result = handle_event(&mut state, &Event::SetFrom("31-02-2025".into()));
        assert!(matches!(result, Err(RecibosError::MalformedDate(_))));
        assert_eq!(state.router.home().form, before);

        handle_event(&mut state, &Event::SetTo("30-04-2025".into())).unwrap();
        assert_eq!(state.router.home().form.range.to.to_wire(), "250430");
    }

    #[test]
    fn first_navigation_runs_initial_load_only_once() {
        let mut state = state();

        let (_, actions) = handle_event(&mut state, &Event::Navigate(ViewRoute::Cedulas)).unwrap();
        assert!(matches!(
            actions[..],
            [Action::RunSearch { route: ViewRoute::Cedulas, .. }]
        ));

        handle_event(&mut state, &Event::Back).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Navigate(ViewRoute::Cedulas)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn back_from_home_is_an_error() {
        let mut state = state();
        assert!(matches!(
            handle_event(&mut state, &Event::Back),
            Err(RecibosError::NoParentRoute)
        ));
    }

    #[test]
    fn outcomes_drive_the_notice() {
        let mut state = state();
        let empty = SearchOutcome::Empty {
            notice: "No se encontraron recibos para 01-04-2025 al 30-04-2025.".into(),
        };

        handle_event(&mut state, &Event::SearchFinished { route: ViewRoute::Home, outcome: empty }).unwrap();
        assert_eq!(
            state.router.notice(ViewRoute::Home),
            Some("No se encontraron recibos para 01-04-2025 al 30-04-2025.")
        );

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchFinished {
                route: ViewRoute::Home,
                outcome: SearchOutcome::Superseded,
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.router.notice(ViewRoute::Home).is_some());

        handle_event(
            &mut state,
            &Event::SearchFinished {
                route: ViewRoute::Home,
                outcome: SearchOutcome::Populated { count: 3 },
            },
        )
        .unwrap();
        assert_eq!(state.router.notice(ViewRoute::Home), None);
    }

    #[test]
    fn report_uses_current_form() {
        let mut state = state();
        handle_event(&mut state, &Event::SetFrom("01-04-2025".into())).unwrap();
        handle_event(&mut state, &Event::SetTo("30-04-2025".into())).unwrap();
        handle_event(&mut state, &Event::SetName("  Acme ".into())).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::OpenReport).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenReport {
                url: "https://api-dzemul-production.up.railway.app/recibos/reporte?desde=250401&hasta=250430&contribuyente=Acme"
                    .into(),
            }]
        );
    }

    #[test]
    fn breakdown_is_receipts_only() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ShowBreakdown).unwrap();
        assert!(matches!(actions[..], [Action::FetchBreakdown { .. }]));

        handle_event(&mut state, &Event::Navigate(ViewRoute::Cedulas)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ShowBreakdown).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn breakdown_failure_sets_home_notice() {
        let mut state = state();
        handle_event(
            &mut state,
            &Event::BreakdownFailed {
                message: "Server error 500: no detail".into(),
            },
        )
        .unwrap();
        assert_eq!(state.router.notice(ViewRoute::Home), Some(FAILED_NOTICE));
    }

    #[tokio::test]
    async fn search_then_page_through_results() {
        let rows: Vec<_> = (1..=150).map(|id| receipt_json(id, "Juan Pérez", 10, "0")).collect();
        let transport = ScriptedTransport::new();
        transport
            .reply("recibos", json!(rows))
            .reply("recibos/totales", receipt_totals_json(1500, 0, 0));
        let mut state = state_with(transport);

        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        settle(&mut state, actions).await;

        let vm = state.compute_viewmodel();
        assert_eq!(vm.rows.len(), 100);
        assert_eq!(vm.pager.page_count, 2);
        assert_eq!(vm.totals[3].value, "150");

        let (_, _) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert_eq!(state.compute_viewmodel().pager.page, 1);

        let (moved, _) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(moved);
        let vm = state.compute_viewmodel();
        assert_eq!(vm.pager.page, 2);
        assert_eq!(vm.rows.len(), 50);

        let (moved, _) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!moved);
    }

    #[tokio::test]
    async fn failed_search_shows_notice_over_old_rows() {
        let transport = ScriptedTransport::new();
        transport
            .reply("recibos", json!([receipt_json(1, "Juan", 10, "0")]))
            .reply("recibos/totales", receipt_totals_json(10, 0, 0))
            .fail("recibos", 503)
            .fail("recibos/totales", 503);
        let mut state = state_with(transport);

        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        settle(&mut state, actions).await;
        let (_, actions) = handle_event(&mut state, &Event::Search).unwrap();
        settle(&mut state, actions).await;

        let vm = state.compute_viewmodel();
        assert_eq!(vm.notice.as_deref(), Some(FAILED_NOTICE));
        assert_eq!(vm.rows.len(), 1);
        assert_eq!(vm.totals[0].value, "$10.00");
    }
}
