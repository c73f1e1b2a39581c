//! Typed dispatch over the closed set of supported intents

use serde_json::Value;

use crate::core::SHARED_SESSION_ID;

/// The intents this backend fulfills, matched by exact display name.
/// Anything else falls through to the platform's own static response.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Welcome,
    Fallback,
    BookAppointment(BookingRequest),
}

/// Parameters extracted for one booking attempt. Transient; lives only
/// for the duration of the webhook invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub session_id: String,
    pub date_time: Option<String>,
    pub person: Option<String>,
    pub subject: Option<String>,
    pub time_zone: Option<String>,
}

impl Intent {
    pub fn from_query(display_name: &str, parameters: &Value, session: &str) -> Option<Self> {
        match display_name {
            "Default Welcome Intent" => Some(Intent::Welcome),
            "Default Fallback Intent" => Some(Intent::Fallback),
            "book.appointment" => Some(Intent::BookAppointment(BookingRequest {
                session_id: session_id_from_path(session),
                date_time: string_param(parameters, "date-time", "date_time"),
                person: string_param(parameters, "person", "name"),
                subject: string_param(parameters, "subject", "subject"),
                time_zone: string_param(parameters, "time-zone", "time_zone"),
            })),
            _ => None,
        }
    }
}

/// The platform sends the session as a resource path
/// (`projects/<p>/agent/sessions/<id>`); the last segment is the id.
fn session_id_from_path(session: &str) -> String {
    let id = session.rsplit('/').next().unwrap_or(session).trim();
    if id.is_empty() {
        SHARED_SESSION_ID.to_string()
    } else {
        id.to_string()
    }
}

/// Pull a string parameter that may arrive plain (`"person": "Alex"`)
/// or object-wrapped (`"person": {"name": "Alex"}`). Blank counts as
/// absent.
fn string_param(parameters: &Value, key: &str, nested_key: &str) -> Option<String> {
    let value = parameters.get(key)?;
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get(nested_key)?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
