//! Router for the chat relay

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};

use super::public::{ChatRequest, ChatResponse};
use crate::api::state::AppState;
use crate::core::SHARED_SESSION_ID;
use crate::fulfillment::NEEDS_AUTH_MARKER;

type SharedState = Arc<RwLock<AppState>>;

/// Forward free text to the NLU collaborator's detect-intent call and
/// relay the textual result. Every chat UI user shares one session,
/// and with it one calendar identity.
async fn chat_relay(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, crate::api::public::ApiError> {
    let detector = {
        let shared_state = state.read().expect("Unable to read shared state");
        Arc::clone(&shared_state.detector)
    };

    let reply = detector
        .detect_intent(SHARED_SESSION_ID, &payload.message)
        .await?;
    let needs_auth = reply.contains(NEEDS_AUTH_MARKER).then_some(true);

    Ok(Json(ChatResponse { reply, needs_auth }))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/chat", post(chat_relay))
}
