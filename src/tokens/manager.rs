//! Access-token lifecycle for a session

use std::sync::Arc;

use chrono::{Duration, Utc};

use super::{REFRESH_WINDOW_SECS, TokenRecord, TokenStore};
use crate::core::AssistantError;
use crate::google::oauth::GoogleOAuthClient;

/// Hands out usable credentials for a session, refreshing through the
/// identity provider when the stored access token is about to expire.
///
/// There is no per-session locking around the refresh: the deployment
/// scope is a single shared session, so concurrent refreshes can only
/// race with themselves and last-write-wins is tolerable. Multi-session
/// fan-out would need mutual exclusion here.
#[derive(Clone)]
pub struct TokenManager {
    store: Arc<dyn TokenStore>,
    oauth: GoogleOAuthClient,
}

impl TokenManager {
    pub fn new(store: Arc<dyn TokenStore>, oauth: GoogleOAuthClient) -> Self {
        Self { store, oauth }
    }

    /// Return credentials that are valid for at least the refresh
    /// window. A refreshed record is persisted before it is returned so
    /// the next caller reads the new token instead of refreshing again.
    pub async fn ensure_fresh(&self, session_id: &str) -> Result<TokenRecord, AssistantError> {
        let record = self.store.get(session_id).await?;

        if !record.expires_within(Duration::seconds(REFRESH_WINDOW_SECS)) {
            return Ok(record);
        }

        tracing::debug!("Access token for session {} expiring, refreshing", session_id);
        let refreshed = self.oauth.refresh(&record.refresh_token).await?;
        let record = TokenRecord {
            access_token: refreshed.access_token,
            // Google omits the refresh token on refresh responses
            refresh_token: refreshed.refresh_token.unwrap_or(record.refresh_token),
            expires_at: Utc::now() + Duration::seconds(refreshed.expires_in),
        };
        self.store.save(session_id, &record).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::core::AppConfig;

    /// In-memory store that also counts saves
    #[derive(Default)]
    struct FakeStore {
        records: Mutex<HashMap<String, TokenRecord>>,
        saves: Mutex<u32>,
    }

    #[async_trait]
    impl TokenStore for FakeStore {
        async fn get(&self, session_id: &str) -> Result<TokenRecord, AssistantError> {
            self.records
                .lock()
                .unwrap()
                .get(session_id)
                .cloned()
                .ok_or_else(|| AssistantError::NotAuthenticated(session_id.to_string()))
        }

        async fn save(
            &self,
            session_id: &str,
            record: &TokenRecord,
        ) -> Result<(), AssistantError> {
            *self.saves.lock().unwrap() += 1;
            self.records
                .lock()
                .unwrap()
                .insert(session_id.to_string(), record.clone());
            Ok(())
        }
    }

    fn oauth_client(base_url: &str) -> GoogleOAuthClient {
        GoogleOAuthClient::new(&AppConfig {
            storage_path: "./".to_string(),
            db_path: "./db".to_string(),
            public_url: "http://127.0.0.1:5000".to_string(),
            google_client_id: "test-client-id".to_string(),
            google_client_secret: "test-client-secret".to_string(),
            google_redirect_uri: "http://127.0.0.1:5000/oauth2callback".to_string(),
            google_project_id: "test-project".to_string(),
            dialogflow_agent_id: "test-agent".to_string(),
            dialogflow_language: "en".to_string(),
            credentials_path: "test-credentials.json".to_string(),
            google_oauth_url: base_url.to_string(),
            google_calendar_url: "https://www.googleapis.com/calendar/v3".to_string(),
            dialogflow_url: "https://dialogflow.googleapis.com".to_string(),
        })
    }

    fn record(expires_at: chrono::DateTime<Utc>) -> TokenRecord {
        TokenRecord {
            access_token: "old-access".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn it_returns_fresh_tokens_without_refreshing() {
        let mut server = mockito::Server::new_async().await;
        let refresh_mock = server.mock("POST", "/token").expect(0).create_async().await;

        let store = Arc::new(FakeStore::default());
        store
            .save("s1", &record(Utc::now() + Duration::hours(1)))
            .await
            .unwrap();
        let manager = TokenManager::new(store.clone(), oauth_client(&server.url()));

        let result = manager.ensure_fresh("s1").await.unwrap();

        assert_eq!(result.access_token, "old-access");
        // Only the seed save happened
        assert_eq!(*store.saves.lock().unwrap(), 1);
        refresh_mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_refreshes_and_persists_expiring_tokens() {
        let mut server = mockito::Server::new_async().await;
        let refresh_mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("refresh_token".into(), "refresh-1".into()),
                mockito::Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "access_token": "new-access",
                    "expires_in": 3599,
                    "token_type": "Bearer"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let store = Arc::new(FakeStore::default());
        store
            .save("s1", &record(Utc::now() + Duration::seconds(30)))
            .await
            .unwrap();
        let manager = TokenManager::new(store.clone(), oauth_client(&server.url()));

        let result = manager.ensure_fresh("s1").await.unwrap();

        assert_eq!(result.access_token, "new-access");
        // The refresh token is carried over when the response omits it
        assert_eq!(result.refresh_token, "refresh-1");
        // Persisted before returning: the store already holds the new token
        let stored = store.get("s1").await.unwrap();
        assert_eq!(stored, result);
        refresh_mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_propagates_not_authenticated_for_unknown_sessions() {
        let server = mockito::Server::new_async().await;
        let store = Arc::new(FakeStore::default());
        let manager = TokenManager::new(store, oauth_client(&server.url()));

        let result = manager.ensure_fresh("unknown").await;

        assert!(matches!(
            result,
            Err(AssistantError::NotAuthenticated(session)) if session == "unknown"
        ));
    }
}
