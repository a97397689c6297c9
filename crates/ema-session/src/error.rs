//! Error types for the session layer.

use ema_protocol::ProtocolError;
use ema_storage::StorageError;

/// Errors that can occur during session management.
///
/// `restore` and `logout` never return these: restore failures mean
/// "not logged in" and logout is best-effort. They surface from the
/// operations that must write credentials.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A storage scope couldn't be read or written.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The user record couldn't be serialized, or the persisted one
    /// couldn't be parsed.
    #[error("user record invalid: {0}")]
    UserRecord(#[from] ProtocolError),

    /// A password-reset completion was attempted while no first-login
    /// reset was pending.
    #[error("no password reset is pending")]
    NotPendingReset,
}
