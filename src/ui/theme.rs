//! Color themes and the ratatui styles derived from them.
//!
//! Themes are TOML files with a name and a table of hex colors. Two Catppuccin
//! variants are compiled in; any other theme can be loaded from a file named in
//! the config.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! title_fg = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! focus_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! status_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! ```
//!
//! An empty or malformed color falls back to the terminal's default color.

use std::fs;
use std::path::Path;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarError, Result};

const CATPPUCCIN_MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const CATPPUCCIN_LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");

/// Named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every styled element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Block titles.
    pub title_fg: String,
    /// Highlighted list row.
    pub selection_fg: String,
    pub selection_bg: String,
    pub text_normal: String,
    /// Subtitles, placeholders and help lines.
    pub text_dim: String,
    pub border: String,
    /// Border of the focused form input and the filter bar.
    pub focus_border: String,
    /// Filter matches inside list titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    pub status_fg: String,
    /// Error view and inline validation messages.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => CATPPUCCIN_MOCHA,
            "catppuccin-latte" => CATPPUCCIN_LATTE,
            _ => return None,
        };

        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Io`] if the file cannot be read and
    /// [`CalendarError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| CalendarError::Config(format!("invalid theme {}: {e}", path.display())))
    }

    /// A theme that leaves every color to the terminal.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: ThemeColors::default(),
        }
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.text_normal))
    }

    #[must_use]
    pub fn dim(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.text_dim))
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(parse_color(&self.colors.title_fg))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.border))
    }

    #[must_use]
    pub fn focus_border(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.focus_border))
    }

    #[must_use]
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(parse_color(&self.colors.selection_fg))
            .bg(parse_color(&self.colors.selection_bg))
    }

    #[must_use]
    pub fn match_highlight(&self) -> Style {
        Style::default()
            .fg(parse_color(&self.colors.match_highlight_fg))
            .bg(parse_color(&self.colors.match_highlight_bg))
    }

    #[must_use]
    pub fn status(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.status_fg))
    }

    #[must_use]
    pub fn error(&self) -> Style {
        Style::default().fg(parse_color(&self.colors.error_fg))
    }
}

impl Default for Theme {
    /// Catppuccin Mocha, or [`Theme::plain`] if the built-in fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::plain)
    }
}

/// Parses `#rrggbb` (the `#` is optional) into an RGB color.
///
/// Anything else yields [`Color::Reset`].
#[must_use]
pub fn parse_color(hex: &str) -> Color {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Reset;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        let mocha = Theme::from_name("catppuccin-mocha").unwrap();
        assert_eq!(mocha.name, "catppuccin-mocha");
        assert_eq!(parse_color(&mocha.colors.text_normal), Color::Rgb(0xcd, 0xd6, 0xf4));

        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(latte.name, "catppuccin-latte");

        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default(), mocha);
    }

    #[test]
    fn parse_color_accepts_hex_with_or_without_hash() {
        assert_eq!(parse_color("#f38ba8"), Color::Rgb(0xf3, 0x8b, 0xa8));
        assert_eq!(parse_color("f38ba8"), Color::Rgb(0xf3, 0x8b, 0xa8));
        assert_eq!(parse_color(""), Color::Reset);
        assert_eq!(parse_color("#zzzzzz"), Color::Reset);
        assert_eq!(parse_color("#fff"), Color::Reset);
        assert_eq!(parse_color("#ééé"), Color::Reset);
    }

    #[test]
    fn theme_file_with_missing_colors_uses_terminal_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"partial\"\n\n[colors]\nerror_fg = \"#ff0000\"").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "partial");
        assert_eq!(theme.error().fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(theme.text().fg, Some(Color::Reset));
    }

    #[test]
    fn malformed_theme_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(CalendarError::Config(_))));
        assert!(matches!(
            Theme::from_file("/nonexistent/theme.toml"),
            Err(CalendarError::Io(_))
        ));
    }
}
