//! gcal-tui: a terminal client for Google Calendar.
//!
//! Lists upcoming events, shows an event's details, and creates, edits and
//! deletes events through a full-screen form, all from the keyboard.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Interactive loop (main.rs)                         │  ← terminal, select!
//! └─────────────────────────────────────────────────────┘
//!                        │ Message
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← mode state machine
//! │  - Message handling, mode transitions               │
//! │  - Event store, list navigation, key bindings       │
//! └─────────────────────────────────────────────────────┘
//!         │ Action             │ Form                │ AppState
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Dispatcher    │   │ Form Engine   │   │ UI Layer      │
//! │ (dispatcher/) │   │ (form/)       │   │ (ui/)         │
//! │ - tokio tasks │   │ - fields      │   │ - select_view │
//! │ - Messages    │   │ - validation  │   │ - ratatui     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────────────────────┐
//! │ Service       │   │  Domain & Infrastructure            │
//! │ (service/)    │   │  - Event model, date parser, errors │
//! │ - REST client │   │  - Config/data paths, OAuth token   │
//! └───────────────┘   └─────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← log file, OTLP
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Mode state machine, event store and list navigation
//! - [`dispatcher`]: Runs calendar commands in background tasks
//! - [`domain`]: Event model, date parser and errors
//! - [`form`]: Field editing and validation for new and edited events
//! - [`infrastructure`]: Config/data directories and OAuth token loading
//! - [`observability`]: Log file and OpenTelemetry span export
//! - [`service`]: Calendar service contract and the Google REST client
//! - [`ui`]: Render selector and ratatui drawing
//!
//! # Configuration
//!
//! Read from `config.toml` in the config directory (see
//! [`infrastructure::paths`]). Every key is optional:
//!
//! ```toml
//! calendar_id = "primary"
//! max_results = 10
//! api_base_url = "https://www.googleapis.com/calendar/v3"
//! token_file = "~/.config/gcal-tui/token.json"
//! margin_x = 2
//! margin_y = 1
//! max_content_width = 150
//! recover_from_errors = false
//! theme = "catppuccin-mocha"
//! # theme_file = "~/my-theme.toml"
//! trace_level = "debug"
//! otlp_traces = false
//! ```
//!
//! # Example
//!
//! ```rust
//! use gcal_tui::app::{handle_message, Mode};
//! use gcal_tui::dispatcher::Message;
//! use gcal_tui::domain::Event;
//! use gcal_tui::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_message(&mut state, &Message::EventsFetched(vec![Event {
//!     id: "evt-1".to_string(),
//!     summary: "Standup".to_string(),
//!     ..Event::default()
//! }]))?;
//! assert!(actions.is_empty());
//! assert_eq!(state.mode, Mode::List);
//! # Ok::<(), gcal_tui::CalendarError>(())
//! ```

pub mod app;
pub mod dispatcher;
pub mod domain;
pub mod form;
pub mod infrastructure;
pub mod observability;
pub mod service;
pub mod ui;

pub use app::{handle_message, Action, AppState, ErrorPolicy, Mode};
pub use domain::{CalendarError, Event, Result};
pub use ui::Theme;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::dates::Clock;
use crate::infrastructure::paths::{default_config_file, default_token_file, expand_tilde};
use crate::service::DEFAULT_BASE_URL;

/// Outer margins and the detail wrap cap.
///
/// Passed by value to everything that lays out content; there is no global
/// style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Columns left empty on each side.
    pub margin_x: u16,
    /// Rows left empty above and below.
    pub margin_y: u16,
    /// Detail text never wraps wider than this.
    pub max_content_width: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 2,
            margin_y: 1,
            max_content_width: 150,
        }
    }
}

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calendar to operate on. Default: `"primary"`
    pub calendar_id: String,

    /// Number of upcoming events fetched. Default: 10
    pub max_results: u32,

    /// Root of the Calendar REST API.
    pub api_base_url: String,

    /// OAuth token written by the authorization flow. Default:
    /// `token.json` in the config directory.
    pub token_file: Option<PathBuf>,

    pub margin_x: u16,
    pub margin_y: u16,
    pub max_content_width: u16,

    /// Keep running after a failed command instead of exiting.
    pub recover_from_errors: bool,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// Tracing filter, e.g. `"debug"` or `"gcal_tui=trace"`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also export spans as OTLP/JSON to the data directory.
    pub otlp_traces: bool,
}

impl Default for Config {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            calendar_id: "primary".to_string(),
            max_results: 10,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            token_file: None,
            margin_x: layout.margin_x,
            margin_y: layout.margin_y,
            max_content_width: layout.max_content_width,
            recover_from_errors: false,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            otlp_traces: false,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the config directory, or defaults if it does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_file())
    }

    /// Like [`Config::load`] for an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalendarError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&contents).map_err(|e| match e {
            CalendarError::Config(message) => {
                CalendarError::Config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] for invalid TOML, wrong value types
    /// or a zero `max_results`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gcal_tui::Config;
    ///
    /// let config = Config::from_toml("calendar_id = \"work\"\nrecover_from_errors = true")?;
    /// assert_eq!(config.calendar_id, "work");
    /// assert_eq!(config.max_results, 10);
    /// # Ok::<(), gcal_tui::CalendarError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| CalendarError::Config(e.to_string()))?;

        if config.max_results == 0 {
            return Err(CalendarError::Config("max_results must be at least 1".to_string()));
        }

        Ok(config)
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            max_content_width: self.max_content_width,
        }
    }

    #[must_use]
    pub const fn error_policy(&self) -> ErrorPolicy {
        if self.recover_from_errors {
            ErrorPolicy::Recover
        } else {
            ErrorPolicy::Terminate
        }
    }

    /// Token file path with `~` expanded.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .as_deref()
            .map_or_else(default_token_file, expand_tilde)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Themes that fail to load are logged and replaced by the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// The store starts empty; the caller dispatches the initial fetch.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        calendar_id = %config.calendar_id,
        error_policy = ?config.error_policy(),
        "initializing gcal-tui"
    );

    AppState::new(config.layout(), config.theme(), Clock::system(), config.error_policy())
}
