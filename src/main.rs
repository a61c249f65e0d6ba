//! Terminal front end and entry point.
//!
//! A line-oriented loop over stdin: each line is one command, mapped to a
//! library [`Event`]. The handler's [`Action`]s are executed here (network
//! calls, printing report links) and their results fed back as events. After
//! every state change the current view is redrawn.
//!
//! # Startup
//!
//! 1. **Config**: `--config <path>`, else `~/.config/recibos/config.toml` if
//!    present, else defaults; then `RECIBOS_*` environment overrides
//! 2. **Tracing**: rotating log file in the data directory
//! 3. **Initial load**: [`Event::Start`] searches today's receipts
//!
//! # Commands
//!
//! - `desde <fecha>` / `hasta <fecha>`: set the date range
//! - `nombre [texto]`: set or clear the payer filter
//! - `buscar`: run the search
//! - `sig` / `ant`: next / previous page
//! - `cedulas`: open the cédulas view
//! - `atras`: return to the previous view
//! - `reporte`: print the report link
//! - `desglose`: per-account breakdown (receipts view)
//! - `salir`: quit

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use recibos::infrastructure::get_config_path;
use recibos::{handle_event, Action, AppState, Config, Event, ViewRoute};

const ENV_PREFIX: &str = "RECIBOS_";
const DEFAULT_COLS: usize = 120;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const USAGE: &str = "uso: recibos [--config <archivo>]";

/// What executing an action leads to.
enum Followup {
    Event(Event),
    Quit,
    Nothing,
}

/// Front end state wrapper.
struct Frontend {
    app: AppState,
    cols: usize,
    /// Last handler error, shown under the frame until the next command.
    error: Option<String>,
}

impl Frontend {
    /// Maps one input line to an event. `None` for blank or unknown input.
    fn map_command(line: &str) -> Option<Event> {
        let line = line.trim();
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));

        Some(match command {
            "desde" => Event::SetFrom(arg.to_string()),
            "hasta" => Event::SetTo(arg.to_string()),
            "nombre" => Event::SetName(arg.to_string()),
            "buscar" => Event::Search,
            "sig" => Event::NextPage,
            "ant" => Event::PrevPage,
            "cedulas" => Event::Navigate(ViewRoute::Cedulas),
            "atras" => Event::Back,
            "reporte" => Event::OpenReport,
            "desglose" => Event::ShowBreakdown,
            "salir" | "q" => Event::Quit,
            _ => {
                tracing::debug!(command = %command, "unknown command");
                return None;
            }
        })
    }

    /// Runs `event` and everything it triggers.
    ///
    /// Returns `false` once the user asked to quit.
    async fn dispatch(&mut self, event: Event) -> bool {
        let mut pending = VecDeque::from([event]);
        let mut redraw = false;

        while let Some(event) = pending.pop_front() {
            let actions = match handle_event(&mut self.app, &event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled"
                    );
                    redraw |= should_render;
                    actions
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                    self.error = Some(e.to_string());
                    redraw = true;
                    continue;
                }
            };

            for action in actions {
                match self.execute_action(action).await {
                    Followup::Event(next) => pending.push_back(next),
                    Followup::Quit => return false,
                    Followup::Nothing => {}
                }
            }
        }

        if redraw {
            self.draw().await;
        }
        true
    }

    async fn execute_action(&self, action: Action) -> Followup {
        match action {
            Action::RunSearch { route, criteria } => {
                match self.app.router.search(route, &criteria).await {
                    Some(outcome) => Followup::Event(Event::SearchFinished { route, outcome }),
                    None => Followup::Nothing,
                }
            }
            Action::FetchBreakdown { range } => {
                let event = match self.app.router.home().coordinator.fetch_breakdown(&range).await {
                    Ok(rows) => Event::BreakdownLoaded { rows },
                    Err(e) => Event::BreakdownFailed {
                        message: e.to_string(),
                    },
                };
                Followup::Event(event)
            }
            Action::OpenReport { url } => {
                write_stdout(&format!("Reporte: {url}\n")).await;
                Followup::Nothing
            }
            Action::Quit => Followup::Quit,
        }
    }

    async fn draw(&mut self) {
        let mut frame = String::from(CLEAR_SCREEN);
        frame.push_str(&recibos::ui::render(&self.app, self.cols));
        if let Some(error) = self.error.take() {
            frame.push_str(&format!(" ! {error}\n"));
        }
        frame.push_str("> ");
        write_stdout(&frame).await;
    }
}

async fn write_stdout(text: &str) {
    let mut stdout = tokio::io::stdout();
    if let Err(e) = stdout.write_all(text.as_bytes()).await {
        tracing::warn!(error = %e, "failed to write to stdout");
        return;
    }
    let _ = stdout.flush().await;
}

/// `--config <path>` from the command line.
fn config_arg(args: &[String]) -> Result<Option<PathBuf>, String> {
    match args {
        [] => Ok(None),
        [flag, path] if flag == "--config" || flag == "-c" => Ok(Some(PathBuf::from(path))),
        _ => Err(USAGE.to_string()),
    }
}

/// Config key for an environment variable name.
///
/// `RECIBOS_PAGE_SIZE` becomes `page_size` and a double underscore separates
/// table and field, so `RECIBOS_CEDULAS__ACCENT` becomes `cedulas.accent`.
fn env_key(name: &str) -> Option<String> {
    let key = name.strip_prefix(ENV_PREFIX)?;
    // consumed by infrastructure::paths
    if key.is_empty() || key == "DATA_DIR" || key == "CONFIG_DIR" {
        return None;
    }
    Some(key.to_ascii_lowercase().replace("__", "."))
}

fn env_overrides() -> BTreeMap<String, String> {
    std::env::vars()
        .filter_map(|(name, value)| Some((env_key(&name)?, value)))
        .collect()
}

fn load_config(explicit: Option<PathBuf>) -> recibos::Result<Config> {
    let mut config = match explicit {
        Some(path) => Config::from_file(path)?,
        None => {
            let default_path = get_config_path();
            if default_path.is_file() {
                Config::from_file(default_path)?
            } else {
                Config::default()
            }
        }
    };
    config.apply_map(&env_overrides());
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match config_arg(&args).and_then(|path| load_config(path).map_err(|e| e.to_string())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    recibos::observability::init_tracing(&config);

    let app = match recibos::initialize(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "initialization failed");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let cols = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(DEFAULT_COLS);

    let mut frontend = Frontend {
        app,
        cols,
        error: None,
    };

    tracing::debug!(cols, "front end started");
    if !frontend.dispatch(Event::Start).await {
        return ExitCode::SUCCESS;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                return ExitCode::FAILURE;
            }
        };

        let Some(event) = Frontend::map_command(&line) else {
            frontend.draw().await;
            continue;
        };
        if !frontend.dispatch(event).await {
            break;
        }
    }

    tracing::debug!("front end stopped");
    ExitCode::SUCCESS
}
