//! Composable UI component renderers.
//!
//! Every component appends ANSI-styled lines to a `String`; nothing here
//! writes to stdout, so a whole frame can be built and then printed at once.
//!
//! # Components
//!
//! - [`header`]: branded title bar, collection and breadcrumb
//! - [`filters`]: date range and name filter box
//! - [`totals`]: totals card
//! - [`table`]: result columns, rows and pager
//! - [`breakdown`]: per-account totals
//! - [`empty`]: empty-result message
//! - [`footer`]: command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Filters box - 3 lines]
//! [Notice]
//! [Totals]
//! [Table Headers]          or   [Empty State]
//! [Table Rows]
//! [Pager]
//! [Breakdown]
//! [Border]
//! [Footer]
//! ```

mod breakdown;
mod empty;
mod filters;
mod footer;
mod header;
mod table;
mod totals;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use breakdown::render_breakdown;
use empty::render_empty_state;
use filters::render_filters;
use footer::render_footer;
use header::render_header;
use table::{render_pager, render_table_headers, render_table_rows};
use totals::render_totals;

/// Appends a horizontal border line.
fn rule(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// `text` centered in `cols` characters, padded on both sides.
fn centered_line(text: &str, cols: usize) -> String {
    let len = text.chars().count();
    let left = cols.saturating_sub(len) / 2;
    let right = cols.saturating_sub(left + len);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Appends the whole screen described by `vm`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    let accent = vm.header.accent.as_str();

    render_header(out, &vm.header, theme, cols);
    render_filters(out, &vm.filters, accent, theme, cols);

    if let Some(notice) = &vm.notice {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.notice_fg));
        out.push(' ');
        out.push_str(notice);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    render_totals(out, &vm.totals, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        render_table_headers(out, &vm.columns, accent);
        render_table_rows(out, &vm.rows, &vm.columns, theme);
        render_pager(out, &vm.pager, theme);
    }

    if let Some(lines) = &vm.breakdown {
        render_breakdown(out, lines, accent, theme);
    }

    render_footer(out, &vm.footer, theme, cols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_counts_characters() {
        assert_eq!(centered_line("Cédulas", 11), "  Cédulas  ");
        assert_eq!(centered_line("too long", 3), "too long");
    }
}
