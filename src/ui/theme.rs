//! Color schemes and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in (`dzemul-light`, the default,
//! and `dzemul-dark`), both using the municipal orange accent; custom themes
//! can be loaded from a file with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffffff"
//! header_bg = "#ff8400"        # optional
//! accent = "#ff8400"
//! text_normal = "#1f1f1f"
//! text_dim = "#6b6b6b"
//! border = "#ffb366"
//! match_highlight_fg = "#1f1f1f"
//! match_highlight_bg = "#ffd8a8"
//! empty_state_fg = "#1565c0"
//! notice_fg = "#c62828"
//! net_fg = "#2e7d32"
//! discount_fg = "#1565c0"
//! cancelled_fg = "#9e9e9e"
//! ```
//!
//! # Example
//!
//! ```
//! use recibos::ui::Theme;
//!
//! let theme = Theme::from_name("dzemul-dark").unwrap();
//! assert_eq!(theme.name, "dzemul-dark");
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{RecibosError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "dzemul-light";

/// Named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Section titles and pager; branding may override it per view.
    pub accent: String,

    pub text_normal: String,
    pub text_dim: String,
    pub border: String,

    /// Payer-name filter matches.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Error notices such as a failed search.
    pub notice_fg: String,

    pub net_fg: String,
    pub discount_fg: String,
    /// Rows of cancelled receipts.
    pub cancelled_fg: String,
}

impl Theme {
    /// Built-in theme by name, `None` if unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "dzemul-light" => include_str!("../../themes/dzemul-light.toml"),
            "dzemul-dark" => include_str!("../../themes/dzemul-dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`RecibosError::Io`] if the file cannot be read
    /// - [`RecibosError::Config`] if the TOML does not describe a theme
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| RecibosError::Config(format!("invalid theme file: {e}")))
    }

    /// Plain palette used if the built-in default ever fails to parse.
    fn fallback() -> Self {
        let text = "#d0d0d0".to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: "#ffffff".to_string(),
                header_bg: None,
                accent: "#ff8400".to_string(),
                text_normal: text.clone(),
                text_dim: "#808080".to_string(),
                border: "#808080".to_string(),
                match_highlight_fg: "#000000".to_string(),
                match_highlight_bg: "#ffff00".to_string(),
                empty_state_fg: text.clone(),
                notice_fg: "#ff0000".to_string(),
                net_fg: text.clone(),
                discount_fg: text,
                cancelled_fg: "#808080".to_string(),
            },
        }
    }

    /// `(r, g, b)` of a hex color; white when unparsable.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!(theme = DEFAULT_THEME, "built-in theme failed to parse, using fallback");
            Self::fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["dzemul-light", "dzemul-dark"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        assert!(Theme::from_name("catppuccin").is_none());
    }

    #[test]
    fn hex_colors_become_escapes() {
        assert_eq!(Theme::fg("#ff8400"), "\u{1b}[38;2;255;132;0m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut toml_str = include_str!("../../themes/dzemul-dark.toml").replace("dzemul-dark", "mine");
        toml_str = toml_str.replace("header_bg = \"#ff8400\"\n", "");
        file.write_all(toml_str.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.header_bg, None);
    }

    #[test]
    fn broken_theme_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(RecibosError::Config(_))));
    }
}
