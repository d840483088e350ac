//! Google Calendar v3 REST client.
//!
//! Implements [`CalendarService`] with `reqwest`, authenticating every request
//! with the bearer token loaded at startup. Token refresh is not attempted: an
//! expired token surfaces as a failed command.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET {base}/calendars/{calendar}/events` |
//! | create | `POST {base}/calendars/{calendar}/events` |
//! | update | `PUT {base}/calendars/{calendar}/events/{id}` |
//! | delete | `DELETE {base}/calendars/{calendar}/events/{id}` |

use super::backend::{CalendarService, ListQuery};
use super::models::{ErrorEnvelope, EventResource, EventsPage};
use crate::domain::dates;
use crate::domain::error::{CalendarError, Result};
use crate::domain::Event;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Authenticated client for one calendar.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    client: Client,
    base_url: Url,
    calendar_id: String,
    access_token: String,
}

impl GoogleCalendar {
    /// Creates a client for `calendar_id` rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if `base_url` is not an absolute
    /// http(s) URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use gcal_tui::service::{GoogleCalendar, DEFAULT_BASE_URL};
    ///
    /// let calendar = GoogleCalendar::new(DEFAULT_BASE_URL, "primary", "ya29.token")?;
    /// # Ok::<(), gcal_tui::domain::CalendarError>(())
    /// ```
    pub fn new(base_url: &str, calendar_id: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| CalendarError::Config(format!("invalid api_base_url {base_url:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(CalendarError::Config(format!(
                "invalid api_base_url {base_url:?}: not a base URL"
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url: url,
            calendar_id: calendar_id.into(),
            access_token: access_token.into(),
        })
    }

    /// Builds `{base}/calendars/{calendar}/events[/{id}]` with each segment
    /// percent-encoded.
    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CalendarError::Config("api_base_url cannot hold a path".to_string()))?;
            segments.pop_if_empty().extend(["calendars", calendar_id, "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        tracing::debug!(status = response.status().as_u16(), "calendar response");
        Ok(response)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(calendar = %query.calendar_id, max = query.max_results))]
    async fn fetch_page(&self, query: &ListQuery) -> Result<Vec<Event>> {
        let url = self.events_url(&query.calendar_id, None)?;
        let params = [
            ("timeMin", dates::to_wire(&query.time_min)),
            ("maxResults", query.max_results.to_string()),
            ("singleEvents", query.single_events.to_string()),
            ("showDeleted", query.show_deleted.to_string()),
            ("orderBy", query.order_by.clone()),
        ];

        let response = self.send(self.client.get(url).query(&params)).await?;
        let page: EventsPage = ensure_success(response).await?.json().await?;
        if page.next_page_token.is_some() {
            tracing::debug!("more events available beyond the first page");
        }

        let events: Vec<Event> = page.items.into_iter().map(Event::from).collect();
        tracing::debug!(count = events.len(), "events listed");
        Ok(events)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(summary = %event.summary))]
    async fn insert(&self, event: &Event) -> Result<()> {
        let url = self.events_url(&self.calendar_id, None)?;
        let body = EventResource::for_insert(event);
        let response = self.send(self.client.post(url).json(&body)).await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(id = %event.id))]
    async fn replace(&self, event: &Event) -> Result<()> {
        let url = self.events_url(&self.calendar_id, Some(&event.id))?;
        let body = EventResource::from(event);
        let response = self.send(self.client.put(url).json(&body)).await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove(&self, id: &str) -> Result<()> {
        let url = self.events_url(&self.calendar_id, Some(id))?;
        let response = self.send(self.client.delete(url)).await?;
        if response.status() == StatusCode::GONE {
            tracing::debug!("event already deleted");
            return Ok(());
        }
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turns a non-success response into [`CalendarError::Service`], preferring the
/// service's own error message over the canonical status text.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    tracing::warn!(status = status.as_u16(), message = %message, "calendar request rejected");
    Err(CalendarError::Service(format!("{}: {message}", status.as_u16())))
}

#[async_trait]
impl CalendarService for GoogleCalendar {
    async fn list_upcoming(&self, query: &ListQuery) -> Result<Vec<Event>> {
        self.fetch_page(query).await
    }

    async fn create(&self, event: &Event) -> Result<()> {
        self.insert(event).await
    }

    async fn update(&self, event: &Event) -> Result<()> {
        self.replace(event).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_url_encodes_segments() {
        let calendar = GoogleCalendar::new(DEFAULT_BASE_URL, "primary", "t").unwrap();
        let url = calendar.events_url("team@group.calendar.google.com", Some("a b/c")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team@group.calendar.google.com/events/a%20b%2Fc"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let calendar = GoogleCalendar::new("http://127.0.0.1:9/v3/", "primary", "t").unwrap();
        let url = calendar.events_url("primary", None).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/v3/calendars/primary/events");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        assert!(matches!(
            GoogleCalendar::new("not a url", "primary", "t"),
            Err(CalendarError::Config(_))
        ));
        assert!(matches!(
            GoogleCalendar::new("mailto:someone@example.com", "primary", "t"),
            Err(CalendarError::Config(_))
        ));
    }
}
