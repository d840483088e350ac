//! Wire representation of calendar resources.
//!
//! These types mirror the JSON the calendar REST API sends and accepts. They
//! are kept apart from the domain [`Event`] so serde attributes and
//! service-only fields never leak into the state machine.

use crate::domain::{Event, EventDateTime};
use serde::{Deserialize, Serialize};

/// Start or end of an event resource. Exactly one of the two fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTimeResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date_time: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
}

/// One event as exchanged with the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    #[serde(default)]
    pub start: EventDateTimeResource,

    #[serde(default)]
    pub end: EventDateTimeResource,
}

impl EventResource {
    /// Body for an insert request; the service assigns the id.
    #[must_use]
    pub fn for_insert(event: &Event) -> Self {
        Self {
            id: String::new(),
            ..Self::from(event)
        }
    }
}

/// One page of an events listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<EventResource>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub message: String,
}

impl From<&EventDateTime> for EventDateTimeResource {
    fn from(value: &EventDateTime) -> Self {
        Self {
            date_time: value.date_time.clone(),
            date: value.date.clone(),
        }
    }
}

impl From<EventDateTimeResource> for EventDateTime {
    fn from(value: EventDateTimeResource) -> Self {
        Self {
            date_time: value.date_time,
            date: value.date,
        }
    }
}

impl From<&Event> for EventResource {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            status: String::new(),
            summary: event.summary.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start: (&event.start).into(),
            end: (&event.end).into(),
        }
    }
}

impl From<EventResource> for Event {
    fn from(resource: EventResource) -> Self {
        Self {
            id: resource.id,
            summary: resource.summary,
            description: resource.description,
            location: resource.location,
            start: resource.start.into(),
            end: resource.end.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_page_decodes_timed_and_all_day_events() {
        let body = json!({
            "kind": "calendar#events",
            "items": [
                {
                    "id": "abc",
                    "status": "confirmed",
                    "summary": "Sample Event",
                    "description": "Sample",
                    "start": { "dateTime": "2024-04-03T00:00:00-07:00", "timeZone": "America/Los_Angeles" },
                    "end": { "dateTime": "2024-04-04T00:00:00-07:00" }
                },
                {
                    "id": "def",
                    "summary": "Offsite",
                    "location": "Lisbon",
                    "start": { "date": "2024-05-01" },
                    "end": { "date": "2024-05-03" }
                }
            ]
        });

        let page: EventsPage = serde_json::from_value(body).unwrap();
        let events: Vec<Event> = page.items.into_iter().map(Event::from).collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start, EventDateTime::timed("2024-04-03T00:00:00-07:00"));
        assert_eq!(events[0].location, "");
        assert_eq!(events[1].start, EventDateTime::all_day("2024-05-01"));
        assert_eq!(events[1].location, "Lisbon");
    }

    #[test]
    fn missing_items_is_an_empty_page() {
        let page: EventsPage = serde_json::from_value(json!({ "kind": "calendar#events" })).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn insert_body_uses_wire_names_and_omits_blanks() {
        let event = Event {
            id: "should-not-be-sent".to_string(),
            summary: "Standup".to_string(),
            start: EventDateTime::timed("2024-04-03T09:00:00-07:00"),
            end: EventDateTime::timed("2024-04-03T10:00:00-07:00"),
            ..Event::default()
        };

        let body = serde_json::to_value(EventResource::for_insert(&event)).unwrap();
        assert_eq!(
            body,
            json!({
                "summary": "Standup",
                "start": { "dateTime": "2024-04-03T09:00:00-07:00" },
                "end": { "dateTime": "2024-04-03T10:00:00-07:00" }
            })
        );
    }

    #[test]
    fn error_envelope_decodes_message() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "error": { "code": 404, "message": "Not Found", "errors": [] }
        }))
        .unwrap();
        assert_eq!(envelope.error.code, 404);
        assert_eq!(envelope.error.message, "Not Found");
    }
}
