//! State machine enums for searches and views.
//!
//! # Search Lifecycle
//!
//! ```text
//! Idle ──search──▶ Searching ──▶ Populated | Empty | Failed
//!                      ▲                      │
//!                      └──────── search ──────┘
//! ```
//!
//! A new search from any state goes straight to `Searching` and supersedes
//! whatever was in flight.
//!
//! # Views
//!
//! Two routes exist: [`ViewRoute::Home`] (receipts) and [`ViewRoute::Cedulas`].

use crate::domain::RecibosError;
use std::fmt;
use std::str::FromStr;

/// Where a coordinator is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search issued yet.
    #[default]
    Idle,
    /// A list + totals pair is in flight.
    Searching,
    /// Last search returned at least one row.
    Populated,
    /// Last search returned zero rows.
    Empty,
    /// Last list fetch failed; the previous rows are still shown.
    Failed,
}

impl SearchState {
    #[must_use]
    pub const fn is_searching(self) -> bool {
        matches!(self, Self::Searching)
    }
}

/// A named view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewRoute {
    /// Receipts browser; always at the bottom of the stack.
    Home,
    /// Cédulas browser.
    Cedulas,
}

impl ViewRoute {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Cedulas => "cedulas",
        }
    }
}

impl fmt::Display for ViewRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewRoute {
    type Err = RecibosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "" | "home" | "recibos" => Ok(Self::Home),
            "cedulas" | "cédulas" => Ok(Self::Cedulas),
            other => Err(RecibosError::Config(format!("unknown route: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_parse_from_names_and_paths() {
        assert_eq!("home".parse::<ViewRoute>().unwrap(), ViewRoute::Home);
        assert_eq!("/".parse::<ViewRoute>().unwrap(), ViewRoute::Home);
        assert_eq!("/cedulas".parse::<ViewRoute>().unwrap(), ViewRoute::Cedulas);
        assert!("/reportes".parse::<ViewRoute>().is_err());
    }
}
