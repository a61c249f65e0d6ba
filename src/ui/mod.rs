//! Terminal rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: top-level rendering entry points
//! - [`components`]: per-section renderers
//! - [`helpers`]: money formatting, name highlighting, cell fitting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BreakdownLine, Column, DisplayRow, EmptyState, FilterInfo, FooterInfo, HeaderInfo, PagerInfo,
    TotalsKind, TotalsLine, UIViewModel,
};
