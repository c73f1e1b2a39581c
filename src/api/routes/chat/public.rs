//! Public types for the chat relay

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Present (and true) only when the reply asks the user to link
    /// their calendar
    #[serde(rename = "needsAuth", skip_serializing_if = "Option::is_none")]
    pub needs_auth: Option<bool>,
}
