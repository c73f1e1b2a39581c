//! SQLite-backed token store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;

use super::{TokenRecord, TokenStore};
use crate::core::AssistantError;

#[derive(Clone)]
pub struct SqliteTokenStore {
    db: Connection,
}

impl SqliteTokenStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn get(&self, session_id: &str) -> Result<TokenRecord, AssistantError> {
        let s_id = session_id.to_owned();
        let row = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT access_token, refresh_token, expires_at
                     FROM session_tokens WHERE session_id = ?",
                )?;
                let mut rows = stmt.query_map([s_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                })?;
                Ok(rows.next().transpose()?)
            })
            .await?;

        match row {
            Some((access_token, refresh_token, expires_at)) => Ok(TokenRecord {
                access_token,
                refresh_token,
                expires_at: DateTime::<Utc>::from_timestamp(expires_at, 0)
                    .unwrap_or_else(Utc::now),
            }),
            None => Err(AssistantError::NotAuthenticated(session_id.to_string())),
        }
    }

    async fn save(&self, session_id: &str, record: &TokenRecord) -> Result<(), AssistantError> {
        let s_id = session_id.to_owned();
        let access_token = record.access_token.clone();
        let refresh_token = record.refresh_token.clone();
        let expires_at = record.expires_at.timestamp();

        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO session_tokens (session_id, access_token, refresh_token, expires_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(session_id) DO UPDATE SET
                         access_token = excluded.access_token,
                         refresh_token = excluded.refresh_token,
                         expires_at = excluded.expires_at",
                    (&s_id, &access_token, &refresh_token, expires_at),
                )?;
                Ok(())
            })
            .await?;

        Ok(())
    }
}
