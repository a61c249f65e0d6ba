//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: `UIViewModel` → ANSI-styled `String`
//!
//! The caller decides where the frame goes (stdout in the binary, a buffer in
//! tests).

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Narrowest width the layout is drawn at.
pub const MIN_COLS: usize = 60;

/// Renders the current route of `state` as one frame `cols` wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::with_capacity(4096);
    components::render_screen(&mut out, vm, theme, cols.max(MIN_COLS));
    out
}
