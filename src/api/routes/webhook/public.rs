//! Wire types for the NLU platform's fulfillment webhook

use serde::{Deserialize, Serialize};

/// Fulfillment request: the intent the platform already classified
/// plus its extracted parameters
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "queryResult")]
    pub query_result: WebhookQueryResult,
    #[serde(default)]
    pub session: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookQueryResult {
    pub intent: WebhookIntent,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct WebhookIntent {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Fulfillment reply envelope. An empty message list tells the
/// platform to use its own static response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    #[serde(rename = "fulfillmentMessages")]
    pub fulfillment_messages: Vec<FulfillmentMessage>,
}

#[derive(Debug, Serialize)]
pub struct FulfillmentMessage {
    pub text: TextMessage,
}

#[derive(Debug, Serialize)]
pub struct TextMessage {
    pub text: Vec<String>,
}

impl WebhookResponse {
    pub fn from_texts(texts: Vec<String>) -> Self {
        Self {
            fulfillment_messages: texts
                .into_iter()
                .map(|text| FulfillmentMessage {
                    text: TextMessage { text: vec![text] },
                })
                .collect(),
        }
    }
}
