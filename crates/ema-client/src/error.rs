//! Error types for the auth API client.

use ema_protocol::ProtocolError;

/// Errors returned by an [`AuthApi`](crate::AuthApi).
///
/// Callers mostly care about one split: did the server answer and say no
/// ([`Rejected`](Self::Rejected)), or did we never get a usable answer
/// (everything else)?
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    ///
    /// `message` and `code` come from the JSON error body when there is
    /// one. A body that isn't JSON leaves both `None`.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
        code: Option<String>,
    },

    /// The request never completed: connection refused, timeout, TLS...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body didn't decode, or a request that
    /// couldn't be encoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl ApiError {
    /// The human-readable message the server sent with a rejection, if
    /// any. Empty messages count as absent.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => {
                message.as_deref().filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }

    /// `true` if the server answered and refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}
