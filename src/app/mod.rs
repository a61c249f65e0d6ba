//! Application layer: per-route search orchestration, routing, and the
//! event/action loop that drives them.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Front end
//!                           ↑                                         │
//!                           └──── SearchFinished / BreakdownLoaded ───┘
//! ```
//!
//! # Modules
//!
//! - [`coordinator`]: [`SearchCoordinator`], one search cycle with the stale-response guard
//! - [`router`]: [`ViewRouter`], the route stack and the screen each route owns
//! - [`modes`]: search lifecycle and route enums
//! - [`state`]: [`AppState`] and view model computation
//! - [`handler`]: [`handle_event`]
//! - [`actions`]: side effects returned by the handler

pub mod actions;
pub mod coordinator;
pub mod handler;
pub mod modes;
pub mod router;
pub mod state;

pub use actions::Action;
pub use coordinator::{CoordinatorSnapshot, SearchCoordinator, SearchOutcome};
pub use handler::{handle_event, Event};
pub use modes::{SearchState, ViewRoute};
pub use router::{RouteScreen, SearchForm, ViewRouter};
pub use state::AppState;
