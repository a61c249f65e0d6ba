//! Per-account breakdown renderer.

use crate::ui::helpers::{fit_cell, padding};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BreakdownLine;

const ACCOUNT_WIDTH: usize = 34;
const AMOUNT_WIDTH: usize = 16;

/// Appends the breakdown table, or a one-line note when it has no accounts.
pub fn render_breakdown(out: &mut String, lines: &[BreakdownLine], accent: &str, theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(accent));
    out.push_str(" Desglose por cuenta");
    out.push_str(Theme::reset());
    out.push('\n');

    if lines.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(" Sin cuentas en el rango.");
        out.push_str(Theme::reset());
        out.push('\n');
        return;
    }

    for line in lines {
        let account = fit_cell(&line.account, ACCOUNT_WIDTH);
        out.push(' ');
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&account);
        out.push_str(&padding(&account, ACCOUNT_WIDTH));
        out.push_str(&Theme::fg(&theme.colors.net_fg));
        out.push_str(&padding(&line.net, AMOUNT_WIDTH));
        out.push_str(&line.net);
        out.push_str(&Theme::fg(&theme.colors.discount_fg));
        out.push_str(&padding(&line.discount, AMOUNT_WIDTH));
        out.push_str(&line.discount);
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
