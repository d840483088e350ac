//! OAuth token loading.
//!
//! The browser authorization flow runs outside this program and leaves a token
//! file behind (the same shape the Google quickstart writes):
//!
//! ```json
//! {
//!   "access_token": "ya29.a0...",
//!   "token_type": "Bearer",
//!   "refresh_token": "1//0g...",
//!   "expiry": "2024-04-03T10:00:00-07:00"
//! }
//! ```
//!
//! Only the access token is used. A token past its expiry is rejected up front
//! so the user is told to re-authorize instead of seeing a 401 from the first
//! request.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarError, Result};

const REAUTHORIZE_HINT: &str = "re-run the authorization flow to create a new token";

/// Token file contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absent or zero-valued expiries mean "does not expire".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl OAuthToken {
    /// Whether the token's expiry lies at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Credentials`] if the expiry is not RFC 3339.
    pub fn is_expired(&self, now: DateTime<FixedOffset>) -> Result<bool> {
        let Some(expiry) = self.expiry.as_deref().filter(|e| !is_zero_time(e)) else {
            return Ok(false);
        };

        let expiry = DateTime::parse_from_rfc3339(expiry)
            .map_err(|e| CalendarError::Credentials(format!("invalid token expiry \"{expiry}\": {e}")))?;
        Ok(expiry <= now)
    }
}

/// The zero time some token writers emit for non-expiring tokens.
fn is_zero_time(expiry: &str) -> bool {
    expiry.is_empty() || expiry.starts_with("0001-01-01")
}

/// Reads the token file at `path` and checks it is usable at `now`.
///
/// # Errors
///
/// Returns [`CalendarError::Credentials`] if the file is missing or unreadable,
/// is not a token, has an empty access token, or has expired.
pub fn load_token(path: &Path, now: DateTime<FixedOffset>) -> Result<OAuthToken> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalendarError::Credentials(format!(
            "cannot read token file {}: {e}; {REAUTHORIZE_HINT}",
            path.display()
        ))
    })?;

    let token: OAuthToken = serde_json::from_str(&contents).map_err(|e| {
        CalendarError::Credentials(format!("invalid token file {}: {e}", path.display()))
    })?;

    if token.access_token.trim().is_empty() {
        return Err(CalendarError::Credentials(format!(
            "token file {} has no access token; {REAUTHORIZE_HINT}",
            path.display()
        )));
    }

    if token.is_expired(now)? {
        return Err(CalendarError::Credentials(format!(
            "token in {} has expired; {REAUTHORIZE_HINT}",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), token_type = %token.token_type, "loaded OAuth token");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-04-03T09:00:00-07:00").unwrap()
    }

    fn token_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_token() {
        let file = token_file(
            r#"{"access_token":"abc","token_type":"Bearer","refresh_token":"r","expiry":"2024-04-03T10:00:00-07:00"}"#,
        );

        let token = load_token(file.path(), now()).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn token_without_expiry_never_expires() {
        let file = token_file(r#"{"access_token":"abc"}"#);
        let token = load_token(file.path(), now()).unwrap();
        assert_eq!(token.token_type, "Bearer");

        let zero = token_file(r#"{"access_token":"abc","expiry":"0001-01-01T00:00:00Z"}"#);
        assert!(load_token(zero.path(), now()).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let file = token_file(r#"{"access_token":"abc","expiry":"2024-04-03T08:59:59-07:00"}"#);
        let err = load_token(file.path(), now()).unwrap_err();
        assert!(matches!(err, CalendarError::Credentials(_)));
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn missing_or_malformed_files_are_credential_errors() {
        let missing = load_token(Path::new("/nonexistent/token.json"), now()).unwrap_err();
        assert!(matches!(missing, CalendarError::Credentials(_)));

        let garbage = token_file("not json");
        assert!(matches!(
            load_token(garbage.path(), now()),
            Err(CalendarError::Credentials(_))
        ));

        let empty = token_file(r#"{"access_token":"  "}"#);
        assert!(matches!(
            load_token(empty.path(), now()),
            Err(CalendarError::Credentials(_))
        ));

        let bad_expiry = token_file(r#"{"access_token":"abc","expiry":"tomorrow"}"#);
        assert!(matches!(
            load_token(bad_expiry.path(), now()),
            Err(CalendarError::Credentials(_))
        ));
    }
}
