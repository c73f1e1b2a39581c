//! Router for the fulfillment webhook

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};

use super::public::{WebhookRequest, WebhookResponse};
use crate::api::state::AppState;
use crate::fulfillment::booking::handle_booking;
use crate::fulfillment::{FALLBACK_REPLY, Intent, WELCOME_REPLY};

type SharedState = Arc<RwLock<AppState>>;

/// Dispatch one fulfillment request to its intent handler. Handler
/// failures become reply text; the webhook itself always answers 200
/// for a well-formed payload.
async fn fulfillment_webhook(
    State(state): State<SharedState>,
    Json(payload): Json<WebhookRequest>,
) -> Json<WebhookResponse> {
    tracing::debug!("Fulfillment request: {:?}", payload);

    let (tokens, calendar, public_url) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.tokens.clone(),
            shared_state.calendar.clone(),
            shared_state.config.public_url.clone(),
        )
    };

    let intent = Intent::from_query(
        &payload.query_result.intent.display_name,
        &payload.query_result.parameters,
        &payload.session,
    );

    let texts = match intent {
        Some(Intent::Welcome) => vec![WELCOME_REPLY.to_string()],
        Some(Intent::Fallback) => vec![FALLBACK_REPLY.to_string()],
        Some(Intent::BookAppointment(request)) => {
            vec![handle_booking(&request, &tokens, &calendar, &public_url).await]
        }
        // Unsupported intent: empty envelope, the platform falls back
        // to its own response
        None => vec![],
    };

    Json(WebhookResponse::from_texts(texts))
}

/// Create the webhook router
pub fn router() -> Router<SharedState> {
    Router::new().route("/webhook", post(fulfillment_webhook))
}
