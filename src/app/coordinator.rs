//! Search orchestration for one resource domain.
//!
//! A [`SearchCoordinator`] issues the two requests of a search (detail list and
//! totals) concurrently, then applies whatever came back to the
//! [`ResultStore`] and the totals summary it exclusively owns.
//!
//! # Failure Handling
//!
//! | List | Totals | Store | Totals | Outcome |
//! |---|---|---|---|---|
//! | ok | ok | replaced | replaced | `Populated` / `Empty` |
//! | ok | err | replaced | kept (logged) | `Populated` / `Empty` |
//! | err | ok | kept | replaced | `Failed` |
//! | err | err | kept | kept (logged) | `Failed` |
//!
//! # Stale Responses
//!
//! Every call to [`SearchCoordinator::search`] takes a ticket from a monotonic
//! counter. When both requests settle the ticket is compared with the latest
//! one issued; a superseded search applies nothing and returns
//! [`SearchOutcome::Superseded`]. The last search *started* wins, whatever the
//! completion order. In-flight requests are not cancelled.

use super::modes::SearchState;
use crate::api::{report_url, ApiTransport, QueryBuilder, QueryParams, Receipts, ResourceDomain, ServiceUrl};
use crate::domain::error::Result;
use crate::domain::{AccountTotals, DateRange, SearchCriteria};
use crate::store::{PageWindow, ResultStore};
use futures_util::future;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a finished [`SearchCoordinator::search`] call means for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rows were found and installed.
    Populated { count: usize },
    /// The search succeeded with zero rows.
    Empty { notice: String },
    /// The list request failed; previously shown rows are kept.
    Failed { notice: String },
    /// A newer search was started before this one settled; nothing applied.
    Superseded,
}

impl SearchOutcome {
    /// User-facing message, if the outcome carries one.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Empty { notice } | Self::Failed { notice } => Some(notice),
            Self::Populated { .. } | Self::Superseded => None,
        }
    }
}

/// Generic message for a failed list request.
pub const FAILED_NOTICE: &str = "No se pudo completar la solicitud. Intente de nuevo.";

/// Owned copy of what a coordinator currently displays.
#[derive(Debug, Clone)]
pub struct CoordinatorSnapshot<D: ResourceDomain> {
    pub state: SearchState,
    pub page_items: Vec<D::Item>,
    pub window: PageWindow,
    pub total_items: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub totals: Option<D::Totals>,
}

#[derive(Debug)]
struct Inner<D: ResourceDomain> {
    state: SearchState,
    store: ResultStore<D::Item>,
    totals: Option<D::Totals>,
}

/// Runs searches for one domain and owns their results.
pub struct SearchCoordinator<D: ResourceDomain> {
    domain: D,
    transport: Arc<dyn ApiTransport>,
    service: ServiceUrl,
    latest_ticket: AtomicU64,
    inner: Mutex<Inner<D>>,
}

impl<D: ResourceDomain> fmt::Debug for SearchCoordinator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCoordinator")
            .field("domain", &self.domain)
            .field("service", &self.service.as_str())
            .field("latest_ticket", &self.latest_ticket)
            .finish_non_exhaustive()
    }
}

impl<D: ResourceDomain> SearchCoordinator<D> {
    #[must_use]
    pub fn new(domain: D, transport: Arc<dyn ApiTransport>, service: ServiceUrl, page_size: usize) -> Self {
        Self {
            domain,
            transport,
            service,
            latest_ticket: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                state: SearchState::Idle,
                store: ResultStore::new(page_size),
                totals: None,
            }),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> &D {
        &self.domain
    }

    /// Lock helper. The lock is never held across an `.await`.
    fn lock(&self) -> MutexGuard<'_, Inner<D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.lock().state
    }

    #[must_use]
    pub fn totals(&self) -> Option<D::Totals> {
        self.lock().totals.clone()
    }

    /// Runs one search cycle and returns once both requests have settled.
    ///
    /// Never fails: network and server errors become [`SearchOutcome::Failed`]
    /// (list) or a log line (totals).
    pub async fn search(&self, criteria: &SearchCriteria) -> SearchOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let prefix = self.domain.prefix();
        let query = QueryBuilder::build(criteria);

        tracing::debug!(
            domain = prefix,
            ticket,
            variant = ?query.variant,
            desde = %query.params.desde,
            hasta = %query.params.hasta,
            contribuyente = ?query.params.contribuyente,
            "search started"
        );
        self.lock().state = SearchState::Searching;

        let list_path = query.variant.list_path(prefix);
        let (list, totals) = future::join(
            self.fetch_list(&list_path, &query.params),
            self.domain.fetch_totals(self.transport.as_ref(), &query.params),
        )
        .await;

        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!(domain = prefix, ticket, "discarding superseded search results");
            return SearchOutcome::Superseded;
        }

        let mut inner = self.lock();

        let outcome = match list {
            Ok(items) if items.is_empty() => {
                inner.store.replace(items);
                tracing::debug!(domain = prefix, "search returned no rows");
                SearchOutcome::Empty {
                    notice: format!(
                        "No se encontraron {} para {}.",
                        self.domain.label(),
                        criteria.describe()
                    ),
                }
            }
            Ok(items) => {
                let count = items.len();
                inner.store.replace(items);
                tracing::debug!(domain = prefix, count, "search populated results");
                SearchOutcome::Populated { count }
            }
            Err(e) => {
                tracing::warn!(domain = prefix, error = %e, "list request failed, keeping previous results");
                SearchOutcome::Failed {
                    notice: FAILED_NOTICE.to_string(),
                }
            }
        };

        match totals {
            Ok(mut fresh) => {
                self.domain.set_found_count(&mut fresh, inner.store.len());
                inner.totals = Some(fresh);
            }
            Err(e) => {
                tracing::warn!(domain = prefix, error = %e, "totals request failed, keeping previous totals");
            }
        }

        inner.state = match outcome {
            SearchOutcome::Populated { .. } => SearchState::Populated,
            SearchOutcome::Empty { .. } => SearchState::Empty,
            SearchOutcome::Failed { .. } | SearchOutcome::Superseded => SearchState::Failed,
        };

        outcome
    }

    async fn fetch_list(&self, path: &str, params: &QueryParams) -> Result<Vec<D::Item>> {
        let body = self.transport.get_json(path, params).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Report URL for the same filters as a search; nothing is fetched.
    #[must_use]
    pub fn build_report_url(&self, criteria: &SearchCriteria) -> String {
        let query = QueryBuilder::build(criteria);
        report_url(&self.service, self.domain.prefix(), &query.params)
    }

    /// Copy of the current page, pager flags, totals and state.
    #[must_use]
    pub fn snapshot(&self) -> CoordinatorSnapshot<D> {
        let inner = self.lock();
        let window = inner.store.window();
        CoordinatorSnapshot {
            state: inner.state,
            page_items: inner.store.page(window).items.to_vec(),
            window,
            total_items: inner.store.len(),
            page_count: inner.store.page_count(),
            has_previous: inner.store.has_previous(window),
            has_next: inner.store.has_next(window),
            totals: inner.totals.clone(),
        }
    }

    /// Advances one page if a next page exists. Returns whether it moved.
    pub fn next_page(&self) -> bool {
        let mut inner = self.lock();
        let window = inner.store.window();
        if !inner.store.has_next(window) {
            return false;
        }
        inner.store.set_page_index(window.page_index + 1);
        true
    }

    /// Goes back one page unless already on the first. Returns whether it moved.
    pub fn previous_page(&self) -> bool {
        let mut inner = self.lock();
        let window = inner.store.window();
        if !inner.store.has_previous(window) {
            return false;
        }
        inner.store.set_page_index(window.page_index - 1);
        true
    }
}

impl SearchCoordinator<Receipts> {
    /// Per-account totals for `range` from `recibos/totales/despliegue`.
    ///
    /// Independent of the search cycle: it neither reads nor changes the
    /// store, totals or state.
    ///
    /// # Errors
    ///
    /// Transport, server and decode errors are returned to the caller.
    pub async fn fetch_breakdown(&self, range: &DateRange) -> Result<Vec<AccountTotals>> {
        self.domain.fetch_breakdown(self.transport.as_ref(), range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{receipt_json, receipt_totals_json, service, ScriptedTransport};
    use crate::api::Cedulas;
    use crate::domain::CanonicalDate;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    fn april() -> DateRange {
        DateRange::new(
            CanonicalDate::from_ymd(2025, 4, 1).unwrap(),
            CanonicalDate::from_ymd(2025, 4, 30).unwrap(),
        )
    }

    fn receipts(transport: &Arc<ScriptedTransport>, page_size: usize) -> SearchCoordinator<Receipts> {
        SearchCoordinator::new(Receipts, Arc::clone(transport) as Arc<dyn ApiTransport>, service(), page_size)
    }

    fn three_receipts() -> Value {
        json!([
            receipt_json(1, "Juan Pérez", 100, "0"),
            receipt_json(2, "Ana Ruiz", 50, "1"),
            receipt_json(3, "Luis Gómez", 25, "0"),
        ])
    }

    #[tokio::test]
    async fn populated_search_fills_store_and_totals() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos", three_receipts())
            .reply("recibos/totales", receipt_totals_json(175, 5, 1));
        let coordinator = receipts(&transport, 2);

        let outcome = coordinator.search(&SearchCriteria::unfiltered(april())).await;
        assert_eq!(outcome, SearchOutcome::Populated { count: 3 });

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.state, SearchState::Populated);
        assert_eq!(snapshot.page_items.len(), 2);
        assert_eq!(snapshot.page_count, 2);
        assert!(snapshot.has_next);
        assert!(!snapshot.has_previous);

        let totals = snapshot.totals.unwrap();
        assert_eq!(totals.total_net, Decimal::new(175, 0));
        assert_eq!(totals.cancelled_count, 1);
        assert_eq!(totals.found_count, 3);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(_, params)| params.desde == "250401" && params.hasta == "250430"));
    }

    #[tokio::test]
    async fn payer_name_targets_filtered_endpoint_for_list_and_totals() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos/filtrar", json!([receipt_json(9, "Acme SA", 10, "0")]))
            .reply("recibos/totales", receipt_totals_json(10, 0, 0));
        let coordinator = receipts(&transport, 100);

        coordinator.search(&SearchCriteria::new(april(), Some(" Acme "))).await;

        let calls = transport.calls();
        let paths: Vec<&str> = calls.iter().map(|(path, _)| path.as_str()).collect();
        assert!(paths.contains(&"recibos/filtrar"));
        assert!(paths.contains(&"recibos/totales"));
        assert!(calls.iter().all(|(_, params)| params.contribuyente.as_deref() == Some("Acme")));
    }

    #[tokio::test]
    async fn empty_result_names_the_criteria() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos/filtrar", json!([]))
            .reply("recibos/totales", receipt_totals_json(0, 0, 0));
        let coordinator = receipts(&transport, 100);

        let outcome = coordinator.search(&SearchCriteria::new(april(), Some("Acme"))).await;
        assert_eq!(
            outcome.notice(),
            Some("No se encontraron recibos para 01-04-2025 al 30-04-2025 (contribuyente: \"Acme\").")
        );
        assert_eq!(coordinator.state(), SearchState::Empty);
        assert_eq!(coordinator.snapshot().total_items, 0);
    }

    #[tokio::test]
    async fn list_failure_keeps_previous_results() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos", three_receipts())
            .reply("recibos/totales", receipt_totals_json(175, 5, 1))
            .fail("recibos", 500)
            .reply("recibos/totales", receipt_totals_json(0, 0, 0));
        let coordinator = receipts(&transport, 100);
        let criteria = SearchCriteria::unfiltered(april());

        coordinator.search(&criteria).await;
        let outcome = coordinator.search(&criteria).await;

        assert_eq!(outcome.notice(), Some(FAILED_NOTICE));
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.state, SearchState::Failed);
        assert_eq!(snapshot.total_items, 3);
        let totals = snapshot.totals.unwrap();
        assert_eq!(totals.total_net, Decimal::ZERO);
        assert_eq!(totals.cancelled_count, 0);
    }

    #[tokio::test]
    async fn first_totals_failure_leaves_totals_unset() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply("recibos", three_receipts()).fail("recibos/totales", 500);
        let coordinator = receipts(&transport, 100);

        let outcome = coordinator.search(&SearchCriteria::unfiltered(april())).await;

        assert_eq!(outcome, SearchOutcome::Populated { count: 3 });
        assert!(coordinator.totals().is_none());
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.state, SearchState::Populated);
        assert_eq!(snapshot.total_items, 3);
        assert!(snapshot.totals.is_none());
    }

    #[tokio::test]
    async fn totals_failure_keeps_previous_totals() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos", three_receipts())
            .reply("recibos/totales", receipt_totals_json(175, 5, 1))
            .reply("recibos", json!([receipt_json(4, "Eva Sol", 1, "0")]))
            .fail("recibos/totales", 502);
        let coordinator = receipts(&transport, 100);
        let criteria = SearchCriteria::unfiltered(april());

        coordinator.search(&criteria).await;
        let outcome = coordinator.search(&criteria).await;

        assert_eq!(outcome, SearchOutcome::Populated { count: 1 });
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.totals.unwrap().total_net, Decimal::new(175, 0));
    }

    #[tokio::test]
    async fn superseded_response_is_discarded() {
        let transport = Arc::new(ScriptedTransport::new());
        let release_first = transport.gated_reply("recibos", three_receipts());
        transport
            .reply("recibos/totales", receipt_totals_json(175, 5, 1))
            .reply("recibos", json!([receipt_json(4, "Eva Sol", 1, "0")]))
            .reply("recibos/totales", receipt_totals_json(1, 0, 0));
        let coordinator = receipts(&transport, 100);
        let criteria = SearchCriteria::unfiltered(april());

        let (first, second) = tokio::join!(coordinator.search(&criteria), async {
            let outcome = coordinator.search(&criteria).await;
            let _ = release_first.send(());
            outcome
        });

        assert_eq!(first, SearchOutcome::Superseded);
        assert_eq!(second, SearchOutcome::Populated { count: 1 });

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.page_items[0].receipt_id, "4");
        assert_eq!(snapshot.totals.unwrap().total_net, Decimal::new(1, 0));
    }

    #[tokio::test]
    async fn paging_stops_at_both_ends() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply("recibos", three_receipts())
            .reply("recibos/totales", receipt_totals_json(175, 5, 1));
        let coordinator = receipts(&transport, 2);
        coordinator.search(&SearchCriteria::unfiltered(april())).await;

        assert!(!coordinator.previous_page());
        assert!(coordinator.next_page());
        assert_eq!(coordinator.snapshot().page_items.len(), 1);
        assert!(!coordinator.next_page());
        assert!(coordinator.previous_page());
        assert_eq!(coordinator.snapshot().window.page_index, 0);
    }

    #[tokio::test]
    async fn cedulas_count_comes_from_the_store() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(
            "cedulas",
            json!([{ "folio": 12, "contribuyente": "Acme", "precio_unitario": 5, "cantidad": 2 }]),
        );
        let coordinator =
            SearchCoordinator::new(Cedulas, Arc::clone(&transport) as Arc<dyn ApiTransport>, service(), 100);

        let outcome = coordinator.search(&SearchCriteria::unfiltered(april())).await;
        assert_eq!(outcome, SearchOutcome::Populated { count: 1 });
        assert_eq!(coordinator.totals().map(|t| t.found_count), Some(1));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn breakdown_leaves_search_state_alone() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(
            "recibos/totales/despliegue",
            json!([{ "cuenta": 4101, "total_neto": 300, "total_descuento": null }]),
        );
        let coordinator = receipts(&transport, 100);

        let rows = coordinator.fetch_breakdown(&april()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account, "4101");
        assert_eq!(rows[0].total_discount, Decimal::ZERO);
        assert_eq!(coordinator.state(), SearchState::Idle);
        assert!(coordinator.totals().is_none());
    }

    #[test]
    fn report_url_uses_search_params() {
        let coordinator = receipts(&Arc::new(ScriptedTransport::new()), 100);
        let url = coordinator.build_report_url(&SearchCriteria::unfiltered(april()));
        assert_eq!(
            url,
            "https://api-dzemul-production.up.railway.app/recibos/reporte?desde=250401&hasta=250430"
        );
    }
}
