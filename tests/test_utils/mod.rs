//! Test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::Router;
use tokio_rusqlite::Connection;

use calbot::api::{AppState, app};
use calbot::core::db::{async_db, initialize_db};
use calbot::core::{AppConfig, AssistantError};
use calbot::dialogflow::IntentDetector;

/// Detector double for the chat relay
pub enum CannedDetector {
    Reply(String),
    Fails,
}

#[async_trait]
impl IntentDetector for CannedDetector {
    async fn detect_intent(
        &self,
        _session_id: &str,
        _text: &str,
    ) -> Result<String, AssistantError> {
        match self {
            CannedDetector::Reply(text) => Ok(text.clone()),
            CannedDetector::Fails => {
                Err(AssistantError::Config("canned detector failure".to_string()))
            }
        }
    }
}

/// Config with test values. Tests point the provider base URLs at a
/// mockito server before building the app.
pub fn test_config() -> AppConfig {
    AppConfig {
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
        google_oauth_url: "https://oauth2.googleapis.com".to_string(),
        google_calendar_url: "https://www.googleapis.com/calendar/v3".to_string(),
        dialogflow_url: "https://dialogflow.googleapis.com".to_string(),
    }
}

pub struct TestContext {
    pub app: Router,
    pub db: Connection,
}

/// Builds the application router over a throwaway database
pub async fn test_app_with(
    mut config: AppConfig,
    detector: Arc<dyn IntentDetector>,
) -> TestContext {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("db");
    fs::create_dir_all(&db_path).expect("Failed to create db directory");
    config.storage_path = dir.path().display().to_string();
    config.db_path = db_path.display().to_string();

    let db = async_db(&config.db_path)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    // Keep the directory alive for the duration of the test run
    std::mem::forget(dir);

    let app_state = AppState::new(db.clone(), config, detector);
    TestContext {
        app: app(Arc::new(RwLock::new(app_state))),
        db,
    }
}

pub async fn test_app() -> TestContext {
    test_app_with(
        test_config(),
        Arc::new(CannedDetector::Reply("Hi there!".to_string())),
    )
    .await
}

/// Number of rows in the session_tokens table
pub async fn token_row_count(db: &Connection) -> i64 {
    db.call(|conn| {
        let count =
            conn.query_row("SELECT COUNT(*) FROM session_tokens", [], |row| row.get(0))?;
        Ok(count)
    })
    .await
    .unwrap()
}
