//! Wire protocol for the EMA portal's auth API.
//!
//! This crate defines the "language" the portal speaks with the external
//! authentication server:
//!
//! - **Types** ([`User`], [`LoginRequest`], [`RegisterRequest`], etc.):
//!   the JSON bodies that travel over HTTP.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below both the HTTP client (which ships the
//! bytes) and the session layer (which persists a [`User`] as JSON). It
//! knows nothing about storage, forms, or navigation.
//!
//! ```text
//! HTTP client (bytes) → Protocol (typed bodies) → Session / Flows
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// `pub use` keeps the public API flat: callers write
// `use ema_protocol::User` instead of `use ema_protocol::types::User`.

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ApiErrorBody, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, Role, UpdatePasswordRequest, UpdatePasswordResponse,
    User, UserId,
};
