//! Error types for the receipts client.
//!
//! This module defines the centralized error type [`RecibosError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Network-facing variants ([`RecibosError::Network`], [`RecibosError::Server`],
//! [`RecibosError::Decode`]) never escape a search: the coordinator converts them
//! into outcomes and log lines.

use thiserror::Error;

/// The main error type for receipts client operations.
///
/// # Examples
///
/// ```
/// use recibos::RecibosError;
///
/// let err = RecibosError::MalformedDate("25-13-01".to_string());
/// assert_eq!(err.to_string(), "Malformed date: 25-13-01");
/// ```
#[derive(Debug, Error)]
pub enum RecibosError {
    /// A wire or display date could not be parsed into a calendar date.
    ///
    /// Callers rendering dates degrade to showing the raw input instead.
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    ///
    /// `detail` carries the `{detail}` field of the response body when the
    /// server sent one. It is meant for logs, not for users.
    #[error("Server error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Optional `detail` message from the error body.
        detail: Option<String>,
    },

    /// A successful response did not have the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Attempted to pop the root view off the router stack.
    #[error("No parent route: the home view cannot be popped")]
    NoParentRoute,

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecibosError {
    /// Whether this error came from talking to the remote service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. } | Self::Decode(_))
    }
}

impl From<serde_json::Error> for RecibosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for receipts client operations.
pub type Result<T> = std::result::Result<T, RecibosError>;
