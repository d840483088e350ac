//! Date/time input parsing.
//!
//! Resolves what the user typed into an absolute timestamp. Structured input
//! (RFC 3339, ISO-like local date-times, bare dates) is handled by `chrono` and is
//! fully deterministic. Anything else is treated as a natural-language phrase
//! ("tomorrow 3pm", "next friday at noon") and resolved by `fuzzydate` relative to
//! a reference instant supplied by the caller.
//!
//! Values without an explicit offset take the offset of the reference instant.
//! Timestamps are written back in the service's wire format with
//! [`to_wire`], which round-trips `2024-04-03T00:00:00-07:00` unchanged.
//!
//! Form fields go through [`resolve`] instead, which also remembers whether the
//! text named a whole day and keeps RFC 3339 input byte-for-byte, so an
//! untouched field is written back exactly as the service sent it.

use crate::domain::error::{CalendarError, Result};
use crate::domain::event::EventDateTime;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use std::fmt;
use std::sync::Arc;

/// Naive date-time layouts accepted before falling back to natural language.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Length of an event whose end was left blank.
pub const DEFAULT_EVENT_LENGTH_HOURS: i64 = 1;

/// Parses date/time text relative to `now`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] carrying the original text when the input
/// is empty or cannot be understood.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use gcal_tui::domain::dates::{parse, to_wire};
///
/// let now = DateTime::parse_from_rfc3339("2024-04-01T12:00:00-07:00").unwrap();
/// let start = parse("2024-04-03 09:30", now).unwrap();
/// assert_eq!(to_wire(&start), "2024-04-03T09:30:00-07:00");
/// ```
pub fn parse(text: &str, now: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
    let input = text.trim();
    if input.is_empty() {
        return Err(CalendarError::InvalidDate(text.to_string()));
    }

    if let Some(parsed) = parse_structured(input, &now) {
        return Ok(parsed);
    }

    let expanded = expand_abbreviations(input);
    let naive = parse_phrase(&expanded, &now).ok_or_else(|| {
        tracing::trace!(input = %input, "natural-language date rejected");
        CalendarError::InvalidDate(input.to_string())
    })?;

    attach_offset(&naive, &now).ok_or_else(|| CalendarError::InvalidDate(input.to_string()))
}

/// A date field's value together with the shape it is written back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDate {
    /// A point in time. `wire` is the text sent to the service.
    Timed {
        instant: DateTime<FixedOffset>,
        wire: String,
    },
    /// A whole day, as typed `YYYY-MM-DD`. `midnight` is its start in the
    /// reference offset.
    AllDay {
        date: NaiveDate,
        midnight: DateTime<FixedOffset>,
    },
}

impl FieldDate {
    /// The instant this value starts at.
    #[must_use]
    pub fn instant(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Timed { instant, .. } => *instant,
            Self::AllDay { midnight, .. } => *midnight,
        }
    }

    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay { .. })
    }

    /// End used when the end field is left blank: one hour later for a
    /// timestamp, the following day for a whole day.
    #[must_use]
    pub fn default_end(&self) -> Self {
        match self {
            Self::Timed { instant, .. } => timed(default_end(instant)),
            Self::AllDay { date, midnight } => date.succ_opt().map_or_else(
                || self.clone(),
                |next| Self::AllDay {
                    date: next,
                    midnight: *midnight + Duration::days(1),
                },
            ),
        }
    }

    /// The same instant as a timestamp, for pairing with a timed counterpart.
    #[must_use]
    pub fn into_timed(self) -> Self {
        match self {
            Self::AllDay { midnight, .. } => timed(midnight),
            timed_value @ Self::Timed { .. } => timed_value,
        }
    }

    /// Wire representation: `dateTime` for timestamps, `date` for whole days.
    #[must_use]
    pub fn to_event_date_time(&self) -> EventDateTime {
        match self {
            Self::Timed { wire, .. } => EventDateTime::timed(wire.clone()),
            Self::AllDay { date, .. } => EventDateTime::all_day(date.format("%Y-%m-%d").to_string()),
        }
    }
}

fn timed(instant: DateTime<FixedOffset>) -> FieldDate {
    FieldDate::Timed {
        wire: to_wire(&instant),
        instant,
    }
}

/// Resolves form input.
///
/// A bare `YYYY-MM-DD` is a whole day. RFC 3339 text is kept verbatim as the
/// wire value; everything else goes through [`parse`] and [`to_wire`].
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] when [`parse`] does.
pub fn resolve(text: &str, now: DateTime<FixedOffset>) -> Result<FieldDate> {
    let input = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| attach_offset(&naive, &now))
            .ok_or_else(|| CalendarError::InvalidDate(input.to_string()))?;
        return Ok(FieldDate::AllDay { date, midnight });
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(FieldDate::Timed {
            instant,
            wire: input.to_string(),
        });
    }

    parse(input, now).map(timed)
}

/// Formats a timestamp in the service's wire format (RFC 3339, whole seconds,
/// numeric offset).
#[must_use]
pub fn to_wire(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// End time used when the user leaves the end field blank.
#[must_use]
pub fn default_end(start: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    *start + Duration::hours(DEFAULT_EVENT_LENGTH_HOURS)
}

fn parse_structured(input: &str, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed);
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return attach_offset(&naive, now);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| attach_offset(&naive, now))
}

/// Resolves a natural-language phrase.
///
/// A trailing `at <time>` is split off when the whole phrase is not
/// understood, and a leading `in` is read as "from now".
fn parse_phrase(phrase: &str, now: &DateTime<FixedOffset>) -> Option<NaiveDateTime> {
    if let Some(resolved) = parse_relative(phrase, now) {
        return Some(resolved);
    }

    let (day, time) = phrase.rsplit_once(" at ")?;
    let day = parse_relative(day.trim(), now)?;
    let time = parse_clock_time(time.trim())?;
    Some(day.date().and_time(time))
}

fn parse_relative(phrase: &str, now: &DateTime<FixedOffset>) -> Option<NaiveDateTime> {
    let reference = now.naive_local();
    if let Ok(resolved) = fuzzydate::parse_relative_to(phrase, reference) {
        return Some(resolved);
    }

    let offset = phrase.strip_prefix("in ")?;
    fuzzydate::parse_relative_to(format!("{} from now", offset.trim()).as_str(), reference).ok()
}

/// Parses a time of day: `noon`, `midnight`, `2pm`, `2:30pm` or `14:30`.
fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    match text {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    let (digits, meridiem) = if let Some(rest) = text.strip_suffix("am") {
        (rest.trim(), Some(false))
    } else if let Some(rest) = text.strip_suffix("pm") {
        (rest.trim(), Some(true))
    } else {
        (text, None)
    };

    let (hour, minute) = match digits.split_once(':') {
        Some((hour, minute)) => (hour.parse::<u32>().ok()?, minute.parse::<u32>().ok()?),
        None if meridiem.is_some() => (digits.parse::<u32>().ok()?, 0),
        None => return None,
    };

    let hour = match meridiem {
        Some(pm) if (1..=12).contains(&hour) => hour % 12 + if pm { 12 } else { 0 },
        Some(_) => return None,
        None => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn attach_offset(naive: &NaiveDateTime, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    now.offset().from_local_datetime(naive).single()
}

/// Expands day and month abbreviations that the natural-language parser does
/// not know ("fri 9am" becomes "friday 9am").
fn expand_abbreviations(input: &str) -> String {
    const ABBREVIATIONS: &[(&str, &str)] = &[
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(short, _)| *short == word)
                .map_or(word, |(_, full)| *full)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Source of the reference instant for date parsing.
///
/// The state machine reads the time through a `Clock` so tests can pin it.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>);

impl Clock {
    /// Clock backed by the local system time.
    #[must_use]
    pub fn system() -> Self {
        Self(Arc::new(|| chrono::Local::now().fixed_offset()))
    }

    /// Clock that always reports `instant`.
    #[must_use]
    pub fn fixed(instant: DateTime<FixedOffset>) -> Self {
        Self(Arc::new(move || instant))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Clock").field(&self.now()).finish()
    }
}
