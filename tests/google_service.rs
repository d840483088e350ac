//! HTTP contract of the Google Calendar client, checked against a local
//! mock server.

use chrono::DateTime;
use gcal_tui::domain::{CalendarError, Event, EventDateTime};
use gcal_tui::service::{CalendarService, GoogleCalendar, ListQuery};
use mockito::{Matcher, Server};
use serde_json::json;

const TOKEN: &str = "ya29.test-token";

fn client(server: &Server) -> GoogleCalendar {
    GoogleCalendar::new(&server.url(), "primary", TOKEN).unwrap()
}

fn query() -> ListQuery {
    let now = DateTime::parse_from_rfc3339("2024-04-03T09:00:00-07:00").unwrap();
    ListQuery::upcoming("primary", now, 10)
}

fn planning() -> Event {
    Event {
        id: "evt-1".to_string(),
        summary: "Planning".to_string(),
        description: "Quarterly".to_string(),
        location: String::new(),
        start: EventDateTime::timed("2024-04-03T10:00:00-07:00"),
        end: EventDateTime::timed("2024-04-03T11:00:00-07:00"),
    }
}

#[tokio::test]
async fn list_sends_upcoming_query_and_maps_items() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/calendars/primary/events")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("timeMin".into(), "2024-04-03T09:00:00-07:00".into()),
            Matcher::UrlEncoded("maxResults".into(), "10".into()),
            Matcher::UrlEncoded("singleEvents".into(), "true".into()),
            Matcher::UrlEncoded("showDeleted".into(), "false".into()),
            Matcher::UrlEncoded("orderBy".into(), "startTime".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "kind": "calendar#events",
                "items": [
                    {
                        "id": "evt-1",
                        "status": "confirmed",
                        "summary": "Planning",
                        "start": { "dateTime": "2024-04-03T10:00:00-07:00" },
                        "end": { "dateTime": "2024-04-03T11:00:00-07:00" }
                    },
                    {
                        "id": "evt-2",
                        "summary": "Offsite",
                        "location": "Lisbon",
                        "start": { "date": "2024-04-10" },
                        "end": { "date": "2024-04-12" }
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let events = client(&server).list_upcoming(&query()).await.unwrap();
    mock.assert_async().await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "evt-1");
    assert_eq!(events[0].start.date_time, "2024-04-03T10:00:00-07:00");
    assert_eq!(events[1].location, "Lisbon");
    assert_eq!(events[1].start.date, "2024-04-10");
    assert!(events[1].start.date_time.is_empty());
}

#[tokio::test]
async fn create_posts_event_without_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/calendars/primary/events")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_body(Matcher::Json(json!({
            "summary": "Planning",
            "description": "Quarterly",
            "start": { "dateTime": "2024-04-03T10:00:00-07:00" },
            "end": { "dateTime": "2024-04-03T11:00:00-07:00" }
        })))
        .with_status(200)
        .with_body(json!({ "id": "assigned" }).to_string())
        .create_async()
        .await;

    client(&server).create(&planning()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn update_puts_to_event_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/calendars/primary/events/evt-1")
        .match_body(Matcher::PartialJson(json!({ "id": "evt-1", "summary": "Planning" })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    client(&server).update(&planning()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_accepts_no_content_and_gone() {
    let mut server = Server::new_async().await;
    let deleted = server
        .mock("DELETE", "/calendars/primary/events/evt-1")
        .with_status(204)
        .create_async()
        .await;
    let gone = server
        .mock("DELETE", "/calendars/primary/events/evt-2")
        .with_status(410)
        .with_body(json!({ "error": { "code": 410, "message": "Resource has been deleted" } }).to_string())
        .create_async()
        .await;

    let calendar = client(&server);
    calendar.delete("evt-1").await.unwrap();
    calendar.delete("evt-2").await.unwrap();

    deleted.assert_async().await;
    gone.assert_async().await;
}

#[tokio::test]
async fn rejected_request_carries_status_and_service_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/calendars/primary/events")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(
            json!({ "error": { "code": 403, "message": "The caller does not have permission" } })
                .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).list_upcoming(&query()).await.unwrap_err();
    match err {
        CalendarError::Service(message) => {
            assert_eq!(message, "403: The caller does not have permission");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_request_without_json_uses_status_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/calendars/primary/events/evt-1")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = client(&server).update(&planning()).await.unwrap_err();
    assert_eq!(err.to_string(), "calendar service error: 503: Service Unavailable");
}
