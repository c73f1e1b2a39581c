//! OAuth consent redirect and callback

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::core::SHARED_SESSION_ID;
use crate::tokens::TokenRecord;

type SharedState = Arc<RwLock<AppState>>;

const MISSING_CODE_BODY: &str =
    "Missing authorization code. Please restart the authorization from the chat.";
const EXCHANGE_FAILED_BODY: &str = "Authorization failed. Please try again from the chat.";
const CONFIRMATION_PAGE: &str = "<!doctype html>
<html>
  <head><title>Calendar linked</title></head>
  <body>
    <h1>All set!</h1>
    <p>Your Google Calendar is now linked. You can close this tab and go back to the chat.</p>
  </body>
</html>";

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

/// Redirect the browser to the Google consent screen
async fn google_auth(State(state): State<SharedState>) -> Redirect {
    let consent_url = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.oauth.consent_url()
    };
    Redirect::temporary(&consent_url)
}

/// Exchange the authorization code for a token pair and persist it
/// under the shared session. Nothing is written on failure.
async fn oauth_callback(
    State(state): State<SharedState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = &params.error {
        tracing::error!("Consent flow returned an error: {}", error);
        return (StatusCode::BAD_REQUEST, MISSING_CODE_BODY).into_response();
    }
    let Some(code) = params.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, MISSING_CODE_BODY).into_response();
    };

    let (oauth, token_store) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.oauth.clone(),
            Arc::clone(&shared_state.token_store),
        )
    };

    let token = match oauth.exchange_code(code).await {
        Ok(token) => token,
        Err(err) => {
            tracing::error!("Code exchange failed: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, EXCHANGE_FAILED_BODY).into_response();
        }
    };
    // Offline access with forced consent is requested, so a missing
    // refresh token means the exchange went wrong
    let Some(refresh_token) = token.refresh_token else {
        tracing::error!("Token response carried no refresh token");
        return (StatusCode::INTERNAL_SERVER_ERROR, EXCHANGE_FAILED_BODY).into_response();
    };

    let record = TokenRecord {
        access_token: token.access_token,
        refresh_token,
        expires_at: Utc::now() + Duration::seconds(token.expires_in),
    };
    if let Err(err) = token_store.save(SHARED_SESSION_ID, &record).await {
        tracing::error!("Failed to persist tokens: {}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, EXCHANGE_FAILED_BODY).into_response();
    }

    Html(CONFIRMATION_PAGE).into_response()
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/google", get(google_auth))
        .route("/oauth2callback", get(oauth_callback))
}
