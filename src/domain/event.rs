//! Calendar event model and its display wrapper.
//!
//! [`Event`] mirrors the fields of a calendar service event that the client reads
//! and writes. [`EventItem`] wraps an event by composition and adds the derived
//! text used by the list, detail and filter code.

/// Start or end point of an event, kept as the service's own strings.
///
/// Timed events carry `date_time` (RFC 3339 with offset); all-day events carry
/// `date` (`YYYY-MM-DD`). Values are passed through untouched; no timezone
/// conversion happens in the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDateTime {
    pub date_time: String,
    pub date: String,
}

impl EventDateTime {
    /// Creates a timed value from an RFC 3339 string.
    #[must_use]
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            date: String::new(),
        }
    }

    /// Creates an all-day value from a `YYYY-MM-DD` string.
    #[must_use]
    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date_time: String::new(),
            date: date.into(),
        }
    }

    /// Returns the timed value when present, otherwise the all-day date.
    #[must_use]
    pub fn as_text(&self) -> &str {
        if self.date_time.is_empty() {
            &self.date
        } else {
            &self.date_time
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_time.is_empty() && self.date.is_empty()
    }
}

/// One calendar entry.
///
/// `id` is assigned by the service and is empty for an event that has been
/// submitted for creation but not yet fetched back. Equality is structural.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

/// Display wrapper around an [`Event`].
///
/// Holds the event explicitly rather than extending it, so every derived value
/// goes through a named accessor.
///
/// # Examples
///
/// ```
/// use gcal_tui::domain::{Event, EventDateTime, EventItem};
///
/// let event = Event {
///     summary: "Standup".to_string(),
///     start: EventDateTime::timed("2024-04-03T09:00:00-07:00"),
///     end: EventDateTime::timed("2024-04-03T09:15:00-07:00"),
///     ..Event::default()
/// };
/// let item = EventItem::new(&event);
/// assert_eq!(item.title(), "Standup");
/// assert_eq!(item.date(), "2024-04-03T09:00:00-07:00 - 2024-04-03T09:15:00-07:00");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EventItem<'a> {
    event: &'a Event,
}

impl<'a> EventItem<'a> {
    #[must_use]
    pub const fn new(event: &'a Event) -> Self {
        Self { event }
    }

    #[must_use]
    pub const fn event(&self) -> &'a Event {
        self.event
    }

    /// List row title.
    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.event.summary
    }

    /// `"<start> - <end>"`, using timed values when the start is timed and
    /// all-day dates otherwise.
    #[must_use]
    pub fn date(&self) -> String {
        let (start, end) = if self.event.start.date_time.is_empty() {
            (&self.event.start.date, &self.event.end.date)
        } else {
            (&self.event.start.date_time, &self.event.end.date_time)
        };
        format!("{start} - {end}")
    }

    /// List row subtitle. This is the date range, not the event's own
    /// description text (see [`Event::description`]).
    #[must_use]
    pub fn description(&self) -> String {
        self.date()
    }

    /// Text matched by the list filter.
    #[must_use]
    pub fn filter_value(&self) -> &'a str {
        &self.event.summary
    }

    /// Full detail text: summary, date range, optional location line, a blank
    /// gap, then the description.
    #[must_use]
    pub fn details(&self) -> String {
        let mut text = format!("{}\n{}\n", self.event.summary, self.date());

        if !self.event.location.is_empty() {
            text.push_str("Location: ");
            text.push_str(&self.event.location);
            text.push('\n');
        }

        text.push_str("\n\n");
        text.push_str(&self.event.description);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            summary: "Sample Event".to_string(),
            description: "Sample".to_string(),
            start: EventDateTime::timed("2024-04-03T00:00:00-07:00"),
            end: EventDateTime::timed("2024-04-04T00:00:00-07:00"),
            ..Event::default()
        }
    }

    #[test]
    fn details_omit_blank_location() {
        let event = sample_event();
        assert_eq!(
            EventItem::new(&event).details(),
            "Sample Event\n2024-04-03T00:00:00-07:00 - 2024-04-04T00:00:00-07:00\n\n\nSample"
        );
    }

    #[test]
    fn details_include_location_line() {
        let mut event = sample_event();
        event.location = "Room 4".to_string();
        assert_eq!(
            EventItem::new(&event).details(),
            "Sample Event\n2024-04-03T00:00:00-07:00 - 2024-04-04T00:00:00-07:00\nLocation: Room 4\n\n\nSample"
        );
    }

    #[test]
    fn all_day_events_show_dates() {
        let event = Event {
            summary: "Offsite".to_string(),
            start: EventDateTime::all_day("2024-05-01"),
            end: EventDateTime::all_day("2024-05-03"),
            ..Event::default()
        };
        let item = EventItem::new(&event);
        assert_eq!(item.date(), "2024-05-01 - 2024-05-03");
        assert_eq!(item.description(), item.date());
        assert_eq!(item.filter_value(), "Offsite");
    }

    #[test]
    fn as_text_prefers_timed_value() {
        let mut value = EventDateTime::all_day("2024-05-01");
        assert_eq!(value.as_text(), "2024-05-01");
        value.date_time = "2024-05-01T10:00:00Z".to_string();
        assert_eq!(value.as_text(), "2024-05-01T10:00:00Z");
        assert!(!value.is_empty());
        assert!(EventDateTime::default().is_empty());
    }
}
