//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only: dates are already
//! `DD-MM-YYYY`, amounts are already `$1,234.56`, highlight ranges are already
//! resolved.

/// Everything the renderer needs for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub filters: FilterInfo,
    /// Totals card lines; empty until a totals request has succeeded.
    pub totals: Vec<TotalsLine>,
    pub columns: Vec<Column>,
    /// Rows of the current page only.
    pub rows: Vec<DisplayRow>,
    pub pager: PagerInfo,
    /// Error notice from the last search, if any.
    pub notice: Option<String>,
    /// Shown instead of the table when the last search returned nothing.
    pub empty_state: Option<EmptyState>,
    /// Per-account totals, when requested on the receipts view.
    pub breakdown: Option<Vec<BreakdownLine>>,
    pub footer: FooterInfo,
}

/// Title bar with the view's branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Collection name, e.g. `Recibos`.
    pub subtitle: String,
    pub logo_url: String,
    /// Branding accent color (hex).
    pub accent: String,
    /// Route stack, e.g. `home › cedulas`.
    pub breadcrumb: String,
}

/// Current form inputs of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInfo {
    pub from: String,
    pub to: String,
    pub name: Option<String>,
    pub searching: bool,
}

/// One `label: value` line of the totals card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsLine {
    pub label: String,
    pub value: String,
    pub kind: TotalsKind,
}

/// Styling hint for a totals line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsKind {
    Net,
    Discount,
    Count,
}

/// Fixed-width table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

/// One table row, one cell per [`Column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    /// Index of the payer-name cell that `highlight_ranges` apply to.
    pub name_cell: usize,
    /// Character ranges of the name filter inside the payer name.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_cancelled: bool,
}

/// Page position, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// One account of the receipts breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownLine {
    pub account: String,
    pub net: String,
    pub discount: String,
}

/// Command hints for the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
