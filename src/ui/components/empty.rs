//! Empty state component renderer.
//!
//! Shown in place of the table when the last search returned no rows. The
//! message echoes the searched range and name filter.

use super::centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends the centered two-line empty state, padded by a blank line each side.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&centered_line(&empty.message, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&centered_line(&empty.subtitle, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push('\n');
}
