//! Error types for the calendar client.
//!
//! This module defines the centralized error type [`CalendarError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Three failure classes exist at runtime and only one of them is ever propagated
//! out of its component:
//!
//! - **Validation** failures stay inside the form engine and are shown inline next
//!   to the offending field.
//! - **Command** failures come back from the calendar service and are reported to
//!   the state machine as a `CommandFailed` message carrying this error's text.
//! - **Store misses** (updating or removing an id the list no longer holds) are
//!   no-ops and never become errors.

use thiserror::Error;

/// The main error type for calendar client operations.
///
/// # Examples
///
/// ```
/// use gcal_tui::domain::CalendarError;
///
/// fn require_summary(summary: &str) -> Result<(), CalendarError> {
///     if summary.is_empty() {
///         return Err(CalendarError::Validation {
///             field: "summary".to_string(),
///             message: "title is required".to_string(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A form field failed validation.
    ///
    /// Only produced when a caller asks the form for an event before the form
    /// has completed; inline errors are stored on the field itself.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Date or time text could not be resolved to a timestamp.
    #[error("could not understand date/time \"{0}\"")]
    InvalidDate(String),

    /// The form was converted before it reached the completed state.
    #[error("form is not complete")]
    FormIncomplete,

    /// The calendar service rejected a request.
    ///
    /// The string carries the HTTP status and the service's own message.
    #[error("calendar service error: {0}")]
    Service(String),

    /// The HTTP transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The OAuth token is missing, unreadable or expired.
    #[error("Credentials error: {0}")]
    Credentials(String),
}

/// A specialized `Result` type for calendar client operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
