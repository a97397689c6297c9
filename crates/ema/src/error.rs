//! Unified error type for the EMA portal core.

use ema_client::ApiError;
use ema_forms::ValidationError;
use ema_protocol::ProtocolError;
use ema_session::SessionError;
use ema_storage::StorageError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `ema` facade, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]` attribute
/// on each variant auto-generates `From` impls, so the `?` operator
/// converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum EmaError {
    /// Encoding or decoding a wire/storage record failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A storage scope couldn't be opened, read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A session operation failed (credential write, reset state).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A form value broke a rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The auth API refused or couldn't be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A configuration value couldn't be understood.
    #[error("invalid configuration: {0}")]
    Config(String),
}
