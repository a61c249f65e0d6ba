//! Domain layer for the receipts client.
//!
//! Core types with no knowledge of HTTP, rendering or the terminal: dates and
//! their three representations, search criteria, the records returned by the
//! service, and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`dates`]: Canonical date with display and wire codecs
//! - [`criteria`]: Date range and search criteria
//! - [`records`]: Receipt, cédula and totals models
//!
//! # Examples
//!
//! ```
//! use recibos::domain::{CanonicalDate, DateRange, SearchCriteria};
//!
//! let from = CanonicalDate::parse_display("01-04-2025")?;
//! let to = CanonicalDate::parse_wire("250430")?;
//! let criteria = SearchCriteria::new(DateRange::new(from, to), Some("Acme"));
//! assert_eq!(criteria.range.from.to_wire(), "250401");
//! # Ok::<(), recibos::RecibosError>(())
//! ```

pub mod criteria;
pub mod dates;
pub mod error;
pub mod records;

pub use criteria::{DateRange, SearchCriteria};
pub use dates::{display_wire_or_raw, parse_utc_offset, CanonicalDate};
pub use error::{RecibosError, Result};
pub use records::{AccountTotals, Cedula, CedulaTotals, Receipt, ReceiptTotals};
