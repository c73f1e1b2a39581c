//! The booking handler: turns a booking request into one calendar
//! event and a reply for the user. All failures become reply text,
//! never an HTTP error.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat};

use super::BookingRequest;
use crate::core::AssistantError;
use crate::google::gcal::{Attendee, CalendarClient, Event, EventTime, Reminders};
use crate::tokens::TokenManager;

const DEFAULT_PERSON: &str = "someone";
pub const CLARIFY_REPLY: &str =
    "I need a date and time to book that. When would you like to meet?";
const EVENT_DESCRIPTION: &str = "Scheduled via the calendar assistant.";

pub async fn handle_booking(
    request: &BookingRequest,
    tokens: &TokenManager,
    calendar: &CalendarClient,
    public_url: &str,
) -> String {
    // No event without a usable date-time, and no credential lookup
    // either
    let Some(raw_start) = request.date_time.as_deref() else {
        return CLARIFY_REPLY.to_string();
    };
    let Some((start, end)) = event_window(raw_start, request.time_zone.as_deref()) else {
        return CLARIFY_REPLY.to_string();
    };

    let person = request.person.as_deref().unwrap_or(DEFAULT_PERSON);
    let summary = summary_for(person, request.subject.as_deref());
    let event = Event {
        summary: summary.clone(),
        description: EVENT_DESCRIPTION.to_string(),
        start,
        end,
        attendees: attendees_for(person),
        reminders: Reminders::default(),
    };

    let result = async {
        let credentials = tokens.ensure_fresh(&request.session_id).await?;
        calendar.insert_event(&credentials.access_token, &event).await
    }
    .await;

    match result {
        Ok(inserted) => format!(
            "Okay, I've booked \"{}\". Here's the link: {}",
            summary, inserted.html_link
        ),
        Err(AssistantError::NotAuthenticated(_)) => format!(
            "It looks like your Google Calendar isn't linked yet. \
             Please visit this link to authorize me: {}/auth/google",
            public_url
        ),
        Err(AssistantError::Forbidden { .. }) => format!(
            "Your Google Calendar access has expired. \
             Please visit this link to re-authorize me: {}/auth/google",
            public_url
        ),
        Err(
            err @ (AssistantError::Rejected { .. }
            | AssistantError::Http { .. }
            | AssistantError::Store(_)
            | AssistantError::Config(_)),
        ) => {
            tracing::error!("Booking failed: {}", err);
            format!(
                "Sorry, I couldn't book that appointment ({}). Please try again.",
                err
            )
        }
    }
}

/// Blank subject becomes "Meeting with {person}"
fn summary_for(person: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => subject.to_string(),
        None => format!("Meeting with {}", person),
    }
}

/// Placeholder address synthesis. There is no contact directory: the
/// attendee is guessed from the person's name and a fixed domain. A
/// real deployment needs an identity-resolution collaborator here.
fn attendees_for(person: &str) -> Vec<Attendee> {
    if person == DEFAULT_PERSON {
        return Vec::new();
    }
    let local: String = person
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    vec![Attendee {
        email: format!("{}@example.com", local),
    }]
}

/// Start/end pair for the event: the start as given, the end exactly
/// one hour later. An RFC 3339 start keeps its offset; a naive
/// ISO-8601 local time is passed through with the provided time zone,
/// defaulting to UTC. Anything else is unusable.
fn event_window(raw: &str, time_zone: Option<&str>) -> Option<(EventTime, EventTime)> {
    if let Ok(start) = DateTime::parse_from_rfc3339(raw) {
        let end = start + Duration::hours(1);
        let zone = time_zone.map(str::to_string);
        return Some((
            EventTime {
                date_time: raw.to_string(),
                time_zone: zone.clone(),
            },
            EventTime {
                date_time: end.to_rfc3339_opts(SecondsFormat::Secs, false),
                time_zone: zone,
            },
        ));
    }

    let start = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
    let end = start + Duration::hours(1);
    let zone = Some(time_zone.unwrap_or("UTC").to_string());
    Some((
        EventTime {
            date_time: raw.to_string(),
            time_zone: zone.clone(),
        },
        EventTime {
            date_time: end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: zone,
        },
    ))
}
