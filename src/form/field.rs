//! Form fields and per-field validation.

use crate::domain::dates::{self, FieldDate};
use chrono::{DateTime, FixedOffset};

/// Identifies one of the fixed form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Summary,
    Description,
    Location,
    Start,
    End,
}

impl FieldKey {
    /// All fields in the order they are shown and visited.
    pub const ALL: [Self; 5] = [
        Self::Summary,
        Self::Description,
        Self::Location,
        Self::Start,
        Self::End,
    ];

    /// Stable key used in logs and error values.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Description => "description",
            Self::Location => "location",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Summary => "Title",
            Self::Description => "Description",
            Self::Location => "Location",
            Self::Start => "Start",
            Self::End => "End (blank = 1 hour)",
        }
    }

    /// Example input shown when the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Summary => "Team sync",
            Self::Description | Self::Location => "",
            Self::Start => "tomorrow 3pm, 2024-04-03 09:30",
            Self::End => "next friday at noon",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Summary | Self::Start)
    }

    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// One labeled input with its current text and validation outcome.
///
/// Date fields also keep the value their text resolved to, so converting a
/// completed form never parses again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    key: FieldKey,
    value: String,
    error: Option<String>,
    parsed: Option<FieldDate>,
}

impl Field {
    #[must_use]
    pub const fn new(key: FieldKey, value: String) -> Self {
        Self {
            key,
            value,
            error: None,
            parsed: None,
        }
    }

    #[must_use]
    pub const fn key(&self) -> FieldKey {
        self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Inline validation message, if the last validation failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn parsed(&self) -> Option<&FieldDate> {
        self.parsed.as_ref()
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub(crate) fn pop(&mut self) {
        self.value.pop();
    }

    pub(crate) fn set(&mut self, value: String) {
        self.value = value;
    }

    /// Re-validates the current text, resolving dates against `now`.
    ///
    /// Returns `true` when the field is valid.
    pub(crate) fn validate(&mut self, now: DateTime<FixedOffset>) -> bool {
        self.parsed = None;
        self.error = None;

        let blank = self.value.trim().is_empty();
        if blank {
            if self.key.is_required() {
                self.error = Some(format!("{} is required", self.key.label().to_lowercase()));
            }
            return self.error.is_none();
        }

        if self.key.is_date() {
            match dates::resolve(&self.value, now) {
                Ok(timestamp) => self.parsed = Some(timestamp),
                Err(e) => self.error = Some(e.to_string()),
            }
        }

        tracing::trace!(field = self.key.key(), valid = self.error.is_none(), "field validated");
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-04-01T12:00:00-07:00").unwrap()
    }

    #[test]
    fn required_fields_reject_blank() {
        let mut summary = Field::new(FieldKey::Summary, "   ".to_string());
        assert!(!summary.validate(now()));
        assert_eq!(summary.error(), Some("title is required"));

        let mut start = Field::new(FieldKey::Start, String::new());
        assert!(!start.validate(now()));
        assert_eq!(start.error(), Some("start is required"));
    }

    #[test]
    fn optional_fields_accept_blank() {
        for key in [FieldKey::Description, FieldKey::Location, FieldKey::End] {
            let mut field = Field::new(key, String::new());
            assert!(field.validate(now()), "{}", key.key());
            assert_eq!(field.parsed(), None);
        }
    }

    #[test]
    fn date_field_caches_parsed_timestamp() {
        let mut start = Field::new(FieldKey::Start, "2024-04-03T00:00:00-07:00".to_string());
        assert!(start.validate(now()));
        assert_eq!(
            start.parsed().map(|t| dates::to_wire(&t.instant())).as_deref(),
            Some("2024-04-03T00:00:00-07:00")
        );
        assert!(!start.parsed().is_some_and(FieldDate::is_all_day));

        let mut end = Field::new(FieldKey::End, "2024-04-04".to_string());
        assert!(end.validate(now()));
        assert!(end.parsed().is_some_and(FieldDate::is_all_day));
    }

    #[test]
    fn unparseable_date_reports_inline_error() {
        let mut end = Field::new(FieldKey::End, "not a date at all xyz".to_string());
        assert!(!end.validate(now()));
        assert!(end.error().is_some_and(|e| e.contains("not a date at all xyz")));
        assert_eq!(end.parsed(), None);
    }

    #[test]
    fn revalidation_clears_previous_error() {
        let mut summary = Field::new(FieldKey::Summary, String::new());
        assert!(!summary.validate(now()));
        summary.push('x');
        assert!(summary.validate(now()));
        assert!(summary.is_valid());
    }
}
