//! Results table renderer.
//!
//! Fixed-width columns taken from the view model; cells longer than their
//! column are cut with `…`. The payer-name cell carries the name filter
//! highlights and cancelled receipts are drawn in the cancelled color.

use crate::ui::helpers::{self, fit_cell, padding};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Column, DisplayRow, PagerInfo};

const GAP: &str = "  ";

/// Appends the bold column titles.
pub fn render_table_headers(out: &mut String, columns: &[Column], accent: &str) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(accent));
    for column in columns {
        let title = fit_cell(column.title, column.width);
        out.push_str(&title);
        out.push_str(&padding(&title, column.width));
        out.push_str(GAP);
    }
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends every row of the current page.
pub fn render_table_rows(out: &mut String, rows: &[DisplayRow], columns: &[Column], theme: &Theme) {
    for row in rows {
        render_table_row(out, row, columns, theme);
    }
}

fn render_table_row(out: &mut String, row: &DisplayRow, columns: &[Column], theme: &Theme) {
    let base = if row.is_cancelled {
        &theme.colors.cancelled_fg
    } else {
        &theme.colors.text_normal
    };
    out.push_str(&Theme::fg(base));

    for (i, (cell, column)) in row.cells.iter().zip(columns).enumerate() {
        let text = fit_cell(cell, column.width);
        if i == row.name_cell && !row.is_cancelled {
            helpers::push_highlighted(out, &text, &row.highlight_ranges, theme);
        } else {
            out.push_str(&text);
        }
        out.push_str(&padding(&text, column.width));
        out.push_str(GAP);
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends `Página x de y · n registros` plus the available moves.
pub fn render_pager(out: &mut String, pager: &PagerInfo, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(
        " Página {} de {} · {} registros",
        pager.page,
        pager.page_count,
        helpers::format_count(pager.total_items)
    ));
    match (pager.has_previous, pager.has_next) {
        (true, true) => out.push_str("   ◀ ant | sig ▶"),
        (true, false) => out.push_str("   ◀ ant"),
        (false, true) => out.push_str("   sig ▶"),
        (false, false) => {}
    }
    out.push_str(Theme::reset());
    out.push('\n');
}
