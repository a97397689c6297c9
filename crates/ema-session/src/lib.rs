//! Client-side session management for the EMA portal.
//!
//! This crate owns the answer to "who is logged in":
//!
//! 1. **Restore**: reading persisted credentials at startup
//! 2. **Login / logout**: writing credentials to the persistent or the
//!    session storage scope, and clearing both
//! 3. **First login**: the `PendingPasswordReset` state a user sits in
//!    until they change the password the school issued them
//!
//! # How it fits in the stack
//!
//! ```text
//! Flows (above)  ← login / register / password reset drive the manager
//!     ↕
//! Session Layer (this crate)  ← state machine + dual-scope persistence
//!     ↕
//! Storage + Protocol (below)  ← key/value scopes, User JSON
//! ```

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{
    Credentials, ScopePolicy, SessionConfig, SessionSnapshot, SessionState,
};
