//! Google OAuth client for the user-consent flow: consent URL, code
//! exchange, and refresh-token exchange.

use reqwest::Client;
use serde::Deserialize;

use crate::core::{AppConfig, AssistantError};

const CONSENT_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Token endpoint response for both the code and refresh grants.
/// Google omits `refresh_token` on refresh responses.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct GoogleOAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    base_url: String,
    http: Client,
}

impl GoogleOAuthClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            base_url: config.google_oauth_url.clone(),
            http: Client::new(),
        }
    }

    /// Consent URL requesting calendar read/write scope, offline
    /// access, and forced consent so a refresh token is issued
    pub fn consent_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            CONSENT_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(CALENDAR_SCOPE)
        )
    }

    /// Exchange an authorization code for a token pair
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AssistantError> {
        self.token_request(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AssistantError> {
        self.token_request(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn token_request(
        &self,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, AssistantError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .form(form)
            .send()
            .await
            .map_err(|source| AssistantError::Http {
                service: "google-oauth",
                source,
            })?;

        if !response.status().is_success() {
            return Err(AssistantError::from_response("google-oauth", response).await);
        }

        response
            .json()
            .await
            .map_err(|source| AssistantError::Http {
                service: "google-oauth",
                source,
            })
    }
}
