//! Per-user directories for configuration, credentials and logs.
//!
//! Everything lives in an `gcal-tui` subdirectory of the platform directories
//! reported by `dirs`:
//!
//! | what | Linux | macOS |
//! |---|---|---|
//! | config, token | `~/.config/gcal-tui` | `~/Library/Application Support/gcal-tui` |
//! | logs, traces | `~/.local/share/gcal-tui` | `~/Library/Application Support/gcal-tui` |
//!
//! When the platform reports no directory, the current directory is used.

use std::path::{Path, PathBuf};

/// Subdirectory name used under every platform directory.
pub const APP_DIR_NAME: &str = "gcal-tui";

/// Directory holding `config.toml` and the OAuth token.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Directory holding the log file and trace exports.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[must_use]
pub fn default_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

#[must_use]
pub fn default_token_file() -> PathBuf {
    get_config_dir().join("token.json")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a tilde, and all paths when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use gcal_tui::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/etc/token.json"), PathBuf::from("/etc/token.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_end_in_app_name() {
        assert!(get_config_dir().ends_with(APP_DIR_NAME));
        assert!(get_data_dir().ends_with(APP_DIR_NAME));
        assert!(default_config_file().ends_with("gcal-tui/config.toml"));
        assert!(default_token_file().ends_with("gcal-tui/token.json"));
    }

    #[test]
    fn expand_tilde_only_touches_leading_tilde() {
        assert_eq!(expand_tilde("relative/~/x"), PathBuf::from("relative/~/x"));
        assert_eq!(expand_tilde("/abs"), PathBuf::from("/abs"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/token.json"), home.join("token.json"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}
