//! Calendar service abstraction.
//!
//! The dispatcher talks to the remote calendar only through [`CalendarService`],
//! which keeps the HTTP client swappable (and mockable in tests). Each method
//! maps to one command kind.

use crate::domain::error::Result;
use crate::domain::Event;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

/// Parameters of the upcoming-events listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Calendar to read, `primary` by default.
    pub calendar_id: String,

    /// Lower bound on event end time; events that already ended are skipped.
    pub time_min: DateTime<FixedOffset>,

    pub max_results: u32,

    /// Expand recurring events into single instances.
    pub single_events: bool,

    pub show_deleted: bool,

    /// Sort key understood by the service (`startTime`).
    pub order_by: String,
}

impl ListQuery {
    /// Upcoming events of `calendar_id` starting from `now`, in start-time
    /// order, recurring events expanded, deleted events excluded.
    #[must_use]
    pub fn upcoming(calendar_id: impl Into<String>, now: DateTime<FixedOffset>, max_results: u32) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            time_min: now,
            max_results,
            single_events: true,
            show_deleted: false,
            order_by: "startTime".to_string(),
        }
    }
}

/// Operations the client performs against a remote calendar.
///
/// # Implementations
///
/// - [`GoogleCalendar`](crate::service::GoogleCalendar): REST client for the
///   Google Calendar v3 API
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Lists events matching `query`, in service order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn list_upcoming(&self, query: &ListQuery) -> Result<Vec<Event>>;

    /// Creates `event`; its id is ignored and assigned by the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn create(&self, event: &Event) -> Result<()>;

    /// Overwrites the event whose id is `event.id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn update(&self, event: &Event) -> Result<()>;

    /// Deletes the event with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn delete(&self, id: &str) -> Result<()>;
}
