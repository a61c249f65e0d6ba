//! Totals card renderer.
//!
//! Mirrors the totals card of the receipts screen: net in bold green,
//! discount in blue, counts in the normal text color.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TotalsKind, TotalsLine};

/// Appends the totals lines on one row, separated by wide gaps.
///
/// Nothing is written when `lines` is empty (no totals fetched yet).
pub fn render_totals(out: &mut String, lines: &[TotalsLine], theme: &Theme) {
    if lines.is_empty() {
        return;
    }

    out.push(' ');
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str("    ");
        }
        let color = match line.kind {
            TotalsKind::Net => {
                out.push_str(Theme::bold());
                &theme.colors.net_fg
            }
            TotalsKind::Discount => &theme.colors.discount_fg,
            TotalsKind::Count => &theme.colors.text_normal,
        };
        out.push_str(&Theme::fg(color));
        out.push_str(&line.label);
        out.push_str(": ");
        out.push_str(&line.value);
        out.push_str(Theme::reset());
    }
    out.push('\n');
}
