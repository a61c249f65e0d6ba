//! Structured logging to a rotating file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → recibos.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `recibos.log` in the data directory (see
//!   [`infrastructure::paths`](crate::infrastructure::paths)); stdout stays
//!   free for the terminal front end
//! - **Automatic Rotation**: files rotate at 10 MB with 3-backup retention
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, LOG_FILE_NAME};
