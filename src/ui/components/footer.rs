//! Footer component renderer.

use super::{centered_line, rule};
use crate::ui::helpers::fit_cell;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Appends a border and the centered, dimmed command hints.
///
/// Hints longer than `cols` are cut so narrow terminals do not wrap.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    rule(out, &theme.colors.border, cols);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&centered_line(&fit_cell(&footer.keybindings, cols), cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
