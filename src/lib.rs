//! Recibos: a terminal client for browsing municipal receipts and cédulas.
//!
//! The crate queries a remote HTTP service by date range and optional payer
//! name, keeps each search's full result set locally for fixed-size paging,
//! shows server-side totals, and builds report-download URLs. Two views
//! exist, receipts (`home`) and cédulas, each with its own independent
//! search state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling / actions                         │
//! │  - ViewRouter + per-route SearchCoordinator         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ API Layer     │
//! │ (ui/)         │   │ (store/)      │   │ (api/)        │
//! │ - Rendering   │   │ - Result set  │   │ - QueryBuilder│
//! │ - Theming     │   │ - Paging      │   │ - Transport   │
//! │ - Components  │   │               │   │ - Domains     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths (infrastructure/)                          │
//! │  - Dates, criteria, records, errors (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber fmt layer, rotating log file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: search coordination, routing and the event/action model
//! - [`api`]: query building, HTTP transport and resource domains
//! - [`store`]: result set with page windows
//! - [`domain`]: dates, search criteria, records and errors
//! - [`ui`]: terminal rendering with theme support
//! - [`infrastructure`]: data and config paths
//! - [`observability`]: log file setup
//!
//! # Configuration
//!
//! A TOML file (default `~/.config/recibos/config.toml`), every key optional:
//!
//! ```toml
//! base_url = "https://api-dzemul-production.up.railway.app/"
//! utc_offset = "-06:00"
//! page_size = 100
//! theme = "dzemul-dark"
//! trace_level = "debug"
//!
//! [cedulas]
//! accent = "#0d47a1"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use recibos::{handle_event, initialize, Action, Config, Event};
//!
//! # async fn run() -> recibos::Result<()> {
//! let mut state = initialize(&Config::default())?;
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//!
//! for action in actions {
//!     if let Action::RunSearch { route, criteria } = action {
//!         if let Some(outcome) = state.router.search(route, &criteria).await {
//!             handle_event(&mut state, &Event::SearchFinished { route, outcome })?;
//!         }
//!     }
//! }
//! println!("{}", recibos::ui::render(&state, 120));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, SearchOutcome, ViewRoute};
pub use domain::{RecibosError, Result};
pub use ui::Theme;

use api::{ApiTransport, HttpTransport, ServiceUrl};
use app::ViewRouter;
use chrono::FixedOffset;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Production service.
pub const DEFAULT_BASE_URL: &str = "https://api-dzemul-production.up.railway.app/";

/// Offset of the region the service operates in.
pub const DEFAULT_UTC_OFFSET: &str = "-06:00";

const DEFAULT_TITLE: &str = "DZEMUL";
const DEFAULT_ACCENT: &str = "#ff8400";
const DEFAULT_LOGO_URL: &str =
    "https://i.ibb.co/TqxbQnsq/Imagen-de-Whats-App-2025-04-23-a-las-10-14-29-559a5c08.jpg";

/// Per-view visual identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub title: String,
    /// Collection name shown under the title.
    pub collection: String,
    pub logo_url: String,
    /// Hex color of the title bar and section titles.
    pub accent: String,
}

impl Branding {
    fn with_collection(collection: &str) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            collection: collection.to_string(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
        }
    }

    /// Sets one field by name. Returns `false` for an unknown field.
    fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "title" => &mut self.title,
            "collection" => &mut self.collection,
            "logo_url" => &mut self.logo_url,
            "accent" => &mut self.accent,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

/// Application configuration.
///
/// Built from defaults, then a TOML file, then flat `key = value` overrides
/// (see [`Config::apply_map`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service base URL. A bare host gets `https://`.
    pub base_url: String,

    /// UTC offset (`-06:00`, `+01`, `Z`) that defines "today".
    ///
    /// Fixed rather than read from the host, since the service and its users
    /// are in one region.
    pub utc_offset: String,

    /// Rows per page. Default: 100
    pub page_size: usize,

    /// Built-in theme: `dzemul-light` (default) or `dzemul-dark`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. `~` is expanded.
    pub theme_file: Option<String>,

    /// Log level directive. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`, or any `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    pub recibos: Branding,
    pub cedulas: Branding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
            page_size: store::DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            recibos: Branding::with_collection("Recibos"),
            cedulas: Branding::with_collection("Cédulas"),
        }
    }
}

impl Config {
    /// Defaults overlaid with flat key/value pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use recibos::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "50".to_string());
    /// map.insert("cedulas.accent".to_string(), "#0d47a1".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 50);
    /// assert_eq!(config.cedulas.accent, "#0d47a1");
    /// assert_eq!(config.recibos.accent, "#ff8400");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_map(map);
        config
    }

    /// Applies flat key/value overrides.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`, `utc_offset`, `theme_file`, `trace_level`: taken as-is
    /// - `theme` (or `theme_name`): built-in theme name
    /// - `page_size`: positive integer; anything else keeps the current value
    /// - `recibos.<field>`, `cedulas.<field>`: branding (`title`,
    ///   `collection`, `logo_url`, `accent`)
    /// - blank values and unknown keys are ignored (logged at debug level)
    pub fn apply_map(&mut self, map: &BTreeMap<String, String>) {
        for (key, value) in map {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if !self.set(key, value) {
                tracing::debug!(key = %key, "ignoring unknown or invalid config key");
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "base_url" => self.base_url = value.to_string(),
            "utc_offset" => self.utc_offset = value.to_string(),
            "theme" | "theme_name" => self.theme_name = Some(value.to_string()),
            "theme_file" => self.theme_file = Some(value.to_string()),
            "trace_level" => self.trace_level = Some(value.to_string()),
            "page_size" => match value.parse::<usize>() {
                Ok(size) if size > 0 => self.page_size = size,
                _ => return false,
            },
            _ => {
                return match key.split_once('.') {
                    Some(("recibos", field)) => self.recibos.set(field, value),
                    Some(("cedulas", field)) => self.cedulas.set(field, value),
                    _ => false,
                };
            }
        }
        true
    }

    /// Defaults overlaid with a TOML file.
    ///
    /// Nested tables become dotted keys, so `[cedulas] accent = "..."` is the
    /// same as the flat key `cedulas.accent`.
    ///
    /// # Errors
    ///
    /// - [`RecibosError::Io`] if the file cannot be read
    /// - [`RecibosError::Config`] if it is not valid TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table: toml::Table = contents
            .parse()
            .map_err(|e| RecibosError::Config(format!("{}: {e}", path.display())))?;

        let mut flat = BTreeMap::new();
        flatten_toml("", &table, &mut flat);
        Ok(Self::from_map(&flat))
    }

    /// The configured offset as a time zone.
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::Config`] if `utc_offset` is not a valid offset.
    pub fn time_zone(&self) -> Result<FixedOffset> {
        domain::parse_utc_offset(&self.utc_offset)
    }

    /// Branding of the view behind `route`.
    #[must_use]
    pub const fn branding(&self, route: ViewRoute) -> &Branding {
        match route {
            ViewRoute::Home => &self.recibos,
            ViewRoute::Cedulas => &self.cedulas,
        }
    }

    /// Theme from `theme_file`, else `theme_name`, else the default.
    ///
    /// Load failures fall back to the default theme and are logged.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let expanded = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&expanded).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %expanded, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn flatten_toml(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_toml(&full, nested, out),
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}

/// Builds the application against the configured service.
///
/// Validates `base_url` and `utc_offset`, builds the `reqwest` transport,
/// loads the theme, and mounts the `home` route. Nothing is fetched yet; send
/// [`Event::Start`] for the initial load.
///
/// # Errors
///
/// - [`RecibosError::Config`] for an invalid base URL or UTC offset
/// - [`RecibosError::Network`] if the HTTP client cannot be created
pub fn initialize(config: &Config) -> Result<AppState> {
    let service = ServiceUrl::parse(&config.base_url)?;
    let transport = HttpTransport::new(service)?;
    initialize_with(config, Arc::new(transport))
}

/// [`initialize`] with a caller-supplied transport.
///
/// # Errors
///
/// [`RecibosError::Config`] for an invalid base URL or UTC offset.
pub fn initialize_with(config: &Config, transport: Arc<dyn ApiTransport>) -> Result<AppState> {
    let _span = tracing::debug_span!("initialize", base_url = %config.base_url).entered();

    let service = ServiceUrl::parse(&config.base_url)?;
    let time_zone = config.time_zone()?;
    let theme = config.load_theme();
    let router = ViewRouter::new(transport, service, config.page_size, time_zone);

    tracing::debug!(
        utc_offset = %time_zone,
        page_size = config.page_size,
        theme = %theme.name,
        "application initialized"
    );

    Ok(AppState::new(config.clone(), theme, router))
}
