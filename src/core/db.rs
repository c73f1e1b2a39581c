//! SQLite connection helpers and schema

use anyhow::Result;
use tokio_rusqlite::Connection;

/// Open the async connection to the app database
pub async fn async_db(db_path: &str) -> Result<Connection, tokio_rusqlite::Error> {
    Connection::open(format!("{}/calbot.sqlite3", db_path)).await
}

/// Create the schema if it doesn't already exist. One row per chat
/// session holding the OAuth token pair.
pub fn initialize_db(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS session_tokens (
             session_id TEXT PRIMARY KEY,
             access_token TEXT NOT NULL,
             refresh_token TEXT NOT NULL,
             expires_at INTEGER NOT NULL
         );",
    )?;

    Ok(())
}
