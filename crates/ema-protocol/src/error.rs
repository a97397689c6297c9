//! Error types for the protocol layer.
//!
//! Each crate in the portal defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in turning bodies into bytes
//! (or back), not in the network or in storage.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: an HTML error page where JSON was expected,
    /// missing required fields such as `token`, or a truncated body.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The body parsed but violates the API contract.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
