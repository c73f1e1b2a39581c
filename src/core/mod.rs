mod config;
pub use config::AppConfig;
pub mod db;
mod error;
pub use error::AssistantError;

/// Conversational session shared by every chat UI user. The deployment
/// scope is one calendar identity, so the relay, the OAuth callback,
/// and the webhook all key off this single constant.
pub const SHARED_SESSION_ID: &str = "calbot-shared-session";
