//! In-memory result storage for the active search.
//!
//! Nothing is persisted: each completed search installs one full snapshot of
//! the server's answer, which is then windowed into fixed-size pages.
//!
//! # Modules
//!
//! - `result_store`: the snapshot container and page windows

pub mod result_store;

pub use result_store::{PageWindow, ResultPage, ResultStore, DEFAULT_PAGE_SIZE};
