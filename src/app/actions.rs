//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never touches the network itself. It
//! returns `Action`s and the front end executes them, feeding the results
//! back as events (`SearchFinished`, `BreakdownLoaded`, ...).
//!
//! # Example
//!
//! ```
//! use recibos::app::{Action, ViewRoute};
//! use recibos::domain::{CanonicalDate, DateRange, SearchCriteria};
//!
//! let day = CanonicalDate::from_ymd(2025, 4, 23)?;
//! let action = Action::RunSearch {
//!     route: ViewRoute::Home,
//!     criteria: SearchCriteria::unfiltered(DateRange::single_day(day)),
//! };
//! assert!(matches!(action, Action::RunSearch { route: ViewRoute::Home, .. }));
//! # Ok::<(), recibos::RecibosError>(())
//! ```

use super::modes::ViewRoute;
use crate::domain::{DateRange, SearchCriteria};

/// Commands for the front end to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a search on the screen behind `route`, then send
    /// [`Event::SearchFinished`](super::Event::SearchFinished).
    RunSearch {
        route: ViewRoute,
        criteria: SearchCriteria,
    },

    /// Hand a report URL to an external browser or print it.
    OpenReport { url: String },

    /// Fetch the per-account receipts breakdown for `range`, then send
    /// `BreakdownLoaded` or `BreakdownFailed`.
    FetchBreakdown { range: DateRange },

    /// Leave the application.
    Quit,
}
