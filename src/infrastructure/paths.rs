//! Filesystem locations for logs and configuration.
//!
//! Lookups follow the XDG base directory conventions with an explicit
//! override per directory. Every function has a `*_from` variant taking the
//! environment as a lookup closure, so resolution can be tested without
//! touching the process environment.

use std::path::PathBuf;

const APP_DIR: &str = "recibos";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory for the log file.
///
/// Resolution order: `RECIBOS_DATA_DIR`, `$XDG_DATA_HOME/recibos`,
/// `$HOME/.local/share/recibos`, then `./recibos` as a last resort.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(|key| std::env::var(key).ok())
}

/// [`get_data_dir`] with an explicit environment.
///
/// # Examples
///
/// ```
/// use recibos::infrastructure::paths::data_dir_from;
/// use std::path::PathBuf;
///
/// let dir = data_dir_from(|key| (key == "HOME").then(|| "/home/ana".to_string()));
/// assert_eq!(dir, PathBuf::from("/home/ana/.local/share/recibos"));
/// ```
#[must_use]
pub fn data_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    resolve(&lookup, "RECIBOS_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"])
}

/// Default configuration file path.
///
/// Resolution order for the directory: `RECIBOS_CONFIG_DIR`,
/// `$XDG_CONFIG_HOME/recibos`, `$HOME/.config/recibos`.
#[must_use]
pub fn get_config_path() -> PathBuf {
    config_path_from(|key| std::env::var(key).ok())
}

/// [`get_config_path`] with an explicit environment.
#[must_use]
pub fn config_path_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    resolve(&lookup, "RECIBOS_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]).join(CONFIG_FILE_NAME)
}

fn resolve(
    lookup: &impl Fn(&str) -> Option<String>,
    override_key: &str,
    xdg_key: &str,
    home_parts: &[&str],
) -> PathBuf {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = non_empty(override_key) {
        return PathBuf::from(expand_tilde_with(&dir, non_empty("HOME").as_deref()));
    }
    if let Some(base) = non_empty(xdg_key) {
        return PathBuf::from(base).join(APP_DIR);
    }
    match non_empty("HOME") {
        Some(home) => home_parts
            .iter()
            .fold(PathBuf::from(home), |path, part| path.join(part))
            .join(APP_DIR),
        None => PathBuf::from(APP_DIR),
    }
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a leading `~`, or any path when `HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn data_dir_prefers_override_then_xdg_then_home() {
        let all = env(&[
            ("RECIBOS_DATA_DIR", "~/logs"),
            ("XDG_DATA_HOME", "/xdg"),
            ("HOME", "/home/ana"),
        ]);
        assert_eq!(data_dir_from(&all), PathBuf::from("/home/ana/logs"));

        let xdg = env(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/ana")]);
        assert_eq!(data_dir_from(&xdg), PathBuf::from("/xdg/recibos"));

        let blank_override = env(&[("RECIBOS_DATA_DIR", "  "), ("HOME", "/home/ana")]);
        assert_eq!(
            data_dir_from(&blank_override),
            PathBuf::from("/home/ana/.local/share/recibos")
        );

        assert_eq!(data_dir_from(env(&[])), PathBuf::from("recibos"));
    }

    #[test]
    fn config_path_ends_with_file_name() {
        let home = env(&[("HOME", "/home/ana")]);
        assert_eq!(
            config_path_from(home),
            PathBuf::from("/home/ana/.config/recibos/config.toml")
        );
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde_with("~/x", Some("/h")), "/h/x");
        assert_eq!(expand_tilde_with("~", Some("/h")), "/h");
        assert_eq!(expand_tilde_with("/abs/~", Some("/h")), "/abs/~");
        assert_eq!(expand_tilde_with("~/x", None), "~/x");
    }
}
