//! API routes module

pub mod auth;
pub mod chat;
pub mod webhook;

use std::sync::{Arc, RwLock};

use axum::Router;
use axum::routing::get;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn liveness() -> &'static str {
    "AI assistant backend is running"
}

/// Create the combined router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Liveness text
        .route("/", get(liveness))
        // Fulfillment webhook called by the NLU platform
        .merge(webhook::router())
        // Chat relay called by the UI
        .merge(chat::router())
        // OAuth consent redirect and callback
        .merge(auth::router())
}
