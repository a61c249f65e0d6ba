//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the front end shows: the
//! configuration, the theme, the [`ViewRouter`] with its per-route screens,
//! and the last per-account breakdown. View models are computed on demand
//! from coordinator snapshots, so nothing here caches rows.
//!
//! # Example
//!
//! ```no_run
//! use recibos::{initialize, Config};
//!
//! let state = initialize(&Config::default())?;
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.header.title, "DZEMUL");
//! # Ok::<(), recibos::RecibosError>(())
//! ```

use super::modes::{SearchState, ViewRoute};
use super::router::{RouteScreen, ViewRouter};
use crate::api::{Cedulas, Receipts, ResourceDomain};
use crate::domain::{AccountTotals, Cedula, CedulaTotals, Receipt, ReceiptTotals};
use crate::ui::helpers::{format_count, format_money, highlight_ranges};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BreakdownLine, Column, DisplayRow, EmptyState, FilterInfo, FooterInfo, HeaderInfo, PagerInfo,
    TotalsKind, TotalsLine, UIViewModel,
};
use crate::Config;

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub theme: Theme,
    pub router: ViewRouter,
    /// Per-account totals from the last `desglose` request on the receipts view.
    ///
    /// Cleared when a new receipts search is requested.
    pub breakdown: Option<Vec<AccountTotals>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, theme: Theme, router: ViewRouter) -> Self {
        Self {
            config,
            theme,
            router,
            breakdown: None,
        }
    }

    /// Builds the view model of the current route.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::debug_span!("compute_viewmodel", route = %self.router.current()).entered();

        match (self.router.current(), self.router.cedulas()) {
            (ViewRoute::Cedulas, Some(screen)) => self.screen_viewmodel(ViewRoute::Cedulas, screen),
            _ => self.screen_viewmodel(ViewRoute::Home, self.router.home()),
        }
    }

    fn screen_viewmodel<D: Tabular>(&self, route: ViewRoute, screen: &RouteScreen<D>) -> UIViewModel {
        let snapshot = screen.coordinator.snapshot();
        let query = screen.form.name.trim();

        let rows = snapshot
            .page_items
            .iter()
            .map(|item| DisplayRow {
                cells: D::cells(item),
                name_cell: D::NAME_CELL,
                highlight_ranges: highlight_ranges(D::payer(item), query),
                is_cancelled: D::is_cancelled(item),
            })
            .collect();

        let (notice, empty_state) = if snapshot.state == SearchState::Empty {
            let message = screen
                .notice
                .clone()
                .unwrap_or_else(|| format!("No se encontraron {}.", screen.coordinator.domain().label()));
            let empty = EmptyState {
                message,
                subtitle: "Pruebe con otro rango de fechas o contribuyente.".to_string(),
            };
            (None, Some(empty))
        } else {
            (screen.notice.clone(), None)
        };

        let breakdown = match route {
            ViewRoute::Home => self.breakdown.as_ref().map(|rows| {
                rows.iter()
                    .map(|row| BreakdownLine {
                        account: row.account.clone(),
                        net: format_money(row.total_net),
                        discount: format_money(row.total_discount),
                    })
                    .collect()
            }),
            ViewRoute::Cedulas => None,
        };

        UIViewModel {
            header: self.compute_header(route),
            filters: FilterInfo {
                from: screen.form.range.from.to_display(),
                to: screen.form.range.to.to_display(),
                name: (!query.is_empty()).then(|| query.to_string()),
                searching: snapshot.state.is_searching(),
            },
            totals: snapshot.totals.as_ref().map_or_else(Vec::new, D::totals_lines),
            columns: D::COLUMNS.to_vec(),
            rows,
            pager: PagerInfo {
                page: snapshot.window.page_index + 1,
                page_count: snapshot.page_count,
                total_items: snapshot.total_items,
                has_previous: snapshot.has_previous,
                has_next: snapshot.has_next,
            },
            notice,
            empty_state,
            breakdown,
            footer: Self::compute_footer(route),
        }
    }

    fn compute_header(&self, route: ViewRoute) -> HeaderInfo {
        let branding = self.config.branding(route);
        let breadcrumb = self
            .router
            .stack()
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(" › ");

        HeaderInfo {
            title: branding.title.clone(),
            subtitle: branding.collection.clone(),
            logo_url: branding.logo_url.clone(),
            accent: branding.accent.clone(),
            breadcrumb,
        }
    }

    fn compute_footer(route: ViewRoute) -> FooterInfo {
        let keybindings = match route {
            ViewRoute::Home => {
                "desde/hasta <fecha>  nombre <texto>  buscar  sig/ant  reporte  desglose  cedulas  salir"
            }
            ViewRoute::Cedulas => "desde/hasta <fecha>  nombre <texto>  buscar  sig/ant  reporte  atras  salir",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// How a domain's records and totals are laid out on screen.
trait Tabular: ResourceDomain {
    const COLUMNS: &'static [Column];
    /// Index of the payer-name column.
    const NAME_CELL: usize;

    fn cells(item: &Self::Item) -> Vec<String>;
    fn payer(item: &Self::Item) -> &str;
    fn totals_lines(totals: &Self::Totals) -> Vec<TotalsLine>;

    fn is_cancelled(_item: &Self::Item) -> bool {
        false
    }
}

fn line(label: &str, value: String, kind: TotalsKind) -> TotalsLine {
    TotalsLine {
        label: label.to_string(),
        value,
        kind,
    }
}

impl Tabular for Receipts {
    const COLUMNS: &'static [Column] = &[
        Column { title: "Recibo", width: 9 },
        Column { title: "Contribuyente", width: 30 },
        Column { title: "Concepto", width: 26 },
        Column { title: "Fecha", width: 10 },
        Column { title: "Neto", width: 13 },
        Column { title: "Descuento", width: 12 },
    ];
    const NAME_CELL: usize = 1;

    fn cells(item: &Receipt) -> Vec<String> {
        vec![
            item.receipt_id.clone(),
            item.payer_name.clone(),
            item.concept.clone(),
            item.display_date(),
            format_money(item.net),
            format_money(item.discount),
        ]
    }

    fn payer(item: &Receipt) -> &str {
        &item.payer_name
    }

    fn totals_lines(totals: &ReceiptTotals) -> Vec<TotalsLine> {
        vec![
            line("Total Neto", format_money(totals.total_net), TotalsKind::Net),
            line("Total Descuento", format_money(totals.total_discount), TotalsKind::Discount),
            line("Cancelados", format_count(usize::try_from(totals.cancelled_count).unwrap_or(usize::MAX)), TotalsKind::Count),
            line("Encontrados", format_count(totals.found_count), TotalsKind::Count),
        ]
    }

    fn is_cancelled(item: &Receipt) -> bool {
        item.is_cancelled()
    }
}

impl Tabular for Cedulas {
    const COLUMNS: &'static [Column] = &[
        Column { title: "Folio", width: 9 },
        Column { title: "Contribuyente", width: 28 },
        Column { title: "Motivo", width: 24 },
        Column { title: "Fecha", width: 10 },
        Column { title: "Importe", width: 13 },
        Column { title: "Recibo Tes.", width: 12 },
    ];
    const NAME_CELL: usize = 1;

    fn cells(item: &Cedula) -> Vec<String> {
        vec![
            item.folio.clone(),
            item.payer_name.clone(),
            item.motive.clone(),
            item.display_date(),
            format_money(item.amount()),
            item.treasury_receipt_id.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn payer(item: &Cedula) -> &str {
        &item.payer_name
    }

    fn totals_lines(totals: &CedulaTotals) -> Vec<TotalsLine> {
        vec![line("Encontradas", format_count(totals.found_count), TotalsKind::Count)]
    }
}
