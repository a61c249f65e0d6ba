//! Filter box renderer: date range, name filter and search status.

use crate::ui::helpers::{fit_cell, padding};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterInfo;

const BOX_MARGIN: usize = 1;

/// Appends a three-line box with the current form inputs.
pub fn render_filters(out: &mut String, filters: &FilterInfo, accent: &str, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(BOX_MARGIN);

    out.push_str(&margin);
    out.push_str(&Theme::fg(accent));
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());
    out.push('\n');

    let mut text = format!(" Desde: {}   Hasta: {}", filters.from, filters.to);
    if let Some(name) = &filters.name {
        text.push_str(&format!("   Contribuyente: {name}"));
    }
    if filters.searching {
        text.push_str("   Buscando...");
    }
    let text = fit_cell(&text, inner_width);

    out.push_str(&margin);
    out.push_str(&Theme::fg(accent));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&text);
    out.push_str(&padding(&text, inner_width));
    out.push_str(&Theme::fg(accent));
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&margin);
    out.push_str(&Theme::fg(accent));
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());
    out.push('\n');
}
