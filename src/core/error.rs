//! Closed error taxonomy shared by the adapters.
//!
//! Adapters produce these variants and handlers match on them
//! exhaustively, so user-facing replies never depend on string
//! matching provider error bodies.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// The token store has no record for this session
    #[error("no credentials stored for session {0}")]
    NotAuthenticated(String),

    /// The identity or calendar provider answered 401/403
    #[error("provider rejected the stored credentials (status {status})")]
    Forbidden { status: u16 },

    /// The provider refused the request for some other reason
    #[error("{service} rejected the request ({status}): {message}")]
    Rejected {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Transport or response-decode failure
    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Token store failure
    #[error("token store failure: {0}")]
    Store(#[from] tokio_rusqlite::Error),

    /// Startup credential or configuration problem, fatal
    #[error("configuration error: {0}")]
    Config(String),
}

impl AssistantError {
    /// Map a non-success provider response to the taxonomy. 401/403
    /// means the credentials are no good; everything else carries the
    /// body text for the generic failure reply.
    pub async fn from_response(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return AssistantError::Forbidden { status };
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        AssistantError::Rejected {
            service,
            status,
            message,
        }
    }
}
