use std::sync::Arc;

use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::dialogflow::IntentDetector;
use crate::google::gcal::CalendarClient;
use crate::google::oauth::GoogleOAuthClient;
use crate::tokens::{SqliteTokenStore, TokenManager, TokenStore};

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    pub token_store: Arc<dyn TokenStore>,
    pub tokens: TokenManager,
    pub oauth: GoogleOAuthClient,
    pub calendar: CalendarClient,
    pub detector: Arc<dyn IntentDetector>,
}

impl AppState {
    /// The detector is injected so tests can substitute a canned one
    pub fn new(db: Connection, config: AppConfig, detector: Arc<dyn IntentDetector>) -> Self {
        let oauth = GoogleOAuthClient::new(&config);
        let token_store: Arc<dyn TokenStore> = Arc::new(SqliteTokenStore::new(db.clone()));
        let tokens = TokenManager::new(Arc::clone(&token_store), oauth.clone());
        let calendar = CalendarClient::new(&config);

        Self {
            db,
            config,
            token_store,
            tokens,
            oauth,
            calendar,
            detector,
        }
    }
}
