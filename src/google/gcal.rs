//! Google Calendar REST adapter. Only the one call this service
//! needs: inserting an event into the user's primary calendar.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::{AppConfig, AssistantError};

#[derive(Debug, Clone, Serialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attendee {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderOverride {
    pub method: &'static str,
    pub minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reminders {
    #[serde(rename = "useDefault")]
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

impl Default for Reminders {
    /// Email a day ahead, popup ten minutes ahead
    fn default() -> Self {
        Self {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: "email",
                    minutes: 24 * 60,
                },
                ReminderOverride {
                    method: "popup",
                    minutes: 10,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub attendees: Vec<Attendee>,
    pub reminders: Reminders,
}

/// The slice of the insert response we relay back to the user
#[derive(Debug, Deserialize)]
pub struct InsertedEvent {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: String,
}

#[derive(Clone)]
pub struct CalendarClient {
    base_url: String,
    http: Client,
}

impl CalendarClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.google_calendar_url.clone(),
            http: Client::new(),
        }
    }

    /// Insert one event into the primary calendar
    pub async fn insert_event(
        &self,
        access_token: &str,
        event: &Event,
    ) -> Result<InsertedEvent, AssistantError> {
        let url = format!("{}/calendars/primary/events", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(event)
            .send()
            .await
            .map_err(|source| AssistantError::Http {
                service: "google-calendar",
                source,
            })?;

        if !response.status().is_success() {
            return Err(AssistantError::from_response("google-calendar", response).await);
        }

        response
            .json()
            .await
            .map_err(|source| AssistantError::Http {
                service: "google-calendar",
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> Event {
        Event {
            summary: "Meeting with Alex".to_string(),
            description: "Scheduled via the calendar assistant.".to_string(),
            start: EventTime {
                date_time: "2025-03-01T10:00:00".to_string(),
                time_zone: Some("UTC".to_string()),
            },
            end: EventTime {
                date_time: "2025-03-01T11:00:00".to_string(),
                time_zone: Some("UTC".to_string()),
            },
            attendees: vec![Attendee {
                email: "alex@example.com".to_string(),
            }],
            reminders: Reminders::default(),
        }
    }

    fn test_client(base_url: &str) -> CalendarClient {
        CalendarClient {
            base_url: base_url.to_string(),
            http: Client::new(),
        }
    }

    #[test]
    fn it_serializes_events_in_the_calendar_wire_shape() {
        let value = serde_json::to_value(test_event()).unwrap();

        assert_eq!(value["summary"], "Meeting with Alex");
        assert_eq!(value["start"]["dateTime"], "2025-03-01T10:00:00");
        assert_eq!(value["start"]["timeZone"], "UTC");
        assert_eq!(value["end"]["dateTime"], "2025-03-01T11:00:00");
        assert_eq!(value["attendees"][0]["email"], "alex@example.com");
        assert_eq!(value["reminders"]["useDefault"], false);
        assert_eq!(value["reminders"]["overrides"][0]["method"], "email");
        assert_eq!(value["reminders"]["overrides"][0]["minutes"], 1440);
        assert_eq!(value["reminders"]["overrides"][1]["method"], "popup");
        assert_eq!(value["reminders"]["overrides"][1]["minutes"], 10);
    }

    #[test]
    fn it_omits_the_time_zone_when_the_offset_is_embedded() {
        let mut event = test_event();
        event.start.time_zone = None;

        let value = serde_json::to_value(event).unwrap();

        assert!(value["start"].get("timeZone").is_none());
    }

    #[tokio::test]
    async fn it_inserts_an_event_and_returns_the_link() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendars/primary/events")
            .match_header("authorization", "Bearer at-1")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "summary": "Meeting with Alex",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "id": "evt-1",
                    "htmlLink": "https://calendar.google.com/event?eid=evt-1"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url());
        let inserted = client.insert_event("at-1", &test_event()).await.unwrap();

        assert_eq!(inserted.id, "evt-1");
        assert_eq!(
            inserted.html_link,
            "https://calendar.google.com/event?eid=evt-1"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_maps_403_to_forbidden() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendars/primary/events")
            .with_status(403)
            .with_body("insufficient scope")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result = client.insert_event("at-1", &test_event()).await;

        assert!(matches!(
            result,
            Err(AssistantError::Forbidden { status: 403 })
        ));
    }
}
