//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the log inside the data directory.
pub const LOG_FILE_NAME: &str = "recibos.log";

/// Installs the global subscriber: an `EnvFilter` plus a plain-text `fmt`
/// layer writing to a rotating file in the data directory.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set
/// 2. `config.trace_level`
/// 3. `"info"`
///
/// An unparsable directive falls back to `"info"`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if needed
/// - Returns silently if it cannot be created; logging is optional
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use recibos::observability::init_tracing;
/// use recibos::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string());

    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = RotatingFile::new(data_dir.join(LOG_FILE_NAME));
    let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

    if tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok() {
        tracing::info!(level = %level, dir = %data_dir.display(), "tracing initialized");
    }
}
