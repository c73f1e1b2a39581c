//! Session token records and the store that persists them

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::core::AssistantError;

mod manager;
mod store;
pub use manager::TokenManager;
pub use store::SqliteTokenStore;

/// Refresh when the access token has less than this long to live
pub const REFRESH_WINDOW_SECS: i64 = 300;

/// OAuth token pair for one chat session. Created on code exchange,
/// read on every booking, mutated in place on refresh, never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// True when the access token expires within `threshold` from now
    /// (or has already expired)
    pub fn expires_within(&self, threshold: Duration) -> bool {
        self.expires_at <= Utc::now() + threshold
    }
}

/// Persistence seam for session tokens. Injected as a trait object so
/// tests can substitute a fake store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Fetch the token pair for a session. A session with no record is
    /// `NotAuthenticated`; a partial record is never returned.
    async fn get(&self, session_id: &str) -> Result<TokenRecord, AssistantError>;

    /// Upsert the full token pair for a session
    async fn save(&self, session_id: &str, record: &TokenRecord) -> Result<(), AssistantError>;
}
