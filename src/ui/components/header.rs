//! Header component renderer.
//!
//! Two lines: the branded title bar in the view's accent color, then the
//! collection name with the route breadcrumb and the logo URL.

use super::{centered_line, rule};
use crate::ui::helpers::{fit_cell, padding};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the header block to `out`.
///
/// The title bar uses the branding accent as background when the theme has a
/// header background, so every view keeps its own color.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if theme.colors.header_bg.is_some() {
        out.push_str(&Theme::bg(&header.accent));
    }
    out.push_str(&centered_line(&header.title, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    let left = format!("{}  ({})", header.subtitle, header.breadcrumb);
    let right = fit_cell(&header.logo_url, cols.saturating_sub(left.chars().count() + 2));
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&header.accent));
    out.push_str(&left);
    out.push_str(Theme::reset());
    out.push_str(&padding(&left, cols.saturating_sub(right.chars().count())));
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&right);
    out.push_str(Theme::reset());
    out.push('\n');

    rule(out, &theme.colors.border, cols);
}
