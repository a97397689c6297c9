//! Session types: the data structures that represent "who is logged in".
//!
//! A session is the client's record of an authenticated user. It tracks:
//! - WHO the user is (`User`, a cached copy of what the server sent)
//! - WHAT state they're in (logged out, active, or owing a password reset)
//! - WHERE their credentials live (persistent or session storage scope)

use std::fmt;

use ema_protocol::User;
use ema_storage::StorageScope;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// What `login` does to the scope it did NOT choose.
///
/// Logging in with "remember me" off after an earlier remembered login
/// leaves the old token sitting in persistent storage. That's how the site
/// has always behaved, so it stays the default; `ClearOtherScope` is the
/// stricter alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopePolicy {
    /// Only the chosen scope is written; the other is left untouched.
    #[default]
    LeaveOtherScope,

    /// The chosen scope is written and `token`/`user` are removed from the
    /// other scope.
    ClearOtherScope,
}

/// Configuration for session behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// See [`ScopePolicy`]. Default: `LeaveOtherScope`.
    pub scope_policy: ScopePolicy,
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The user and token held by an authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The cached user record.
    pub user: User,

    /// The opaque auth token issued by the server.
    pub token: String,

    /// The storage scope the credentials were written to (or, after a
    /// restore, the scope the user record was read from).
    pub scope: StorageScope,
}

/// Hand-written so the token never ends up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The authentication state of the client.
///
/// ```text
///   LoggedOut ──(login)──────────────→ Active
///       │                                 ↑
///       └──(login, first login)──→ PendingPasswordReset
///                                         │
///             (complete_password_reset) ──┘
///
///   any state ──(logout)──→ LoggedOut
/// ```
///
/// - **LoggedOut**: nobody is authenticated.
/// - **Active**: a user is logged in and can use the site normally.
/// - **PendingPasswordReset**: the server flagged this as the account's
///   first login. The user IS logged in (credentials are persisted) but
///   owes a password change. Only a completed reset moves them to Active.
///
/// Because the user lives inside the authenticated variants, "authenticated
/// implies a current user" can't be violated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Active(Credentials),
    PendingPasswordReset(Credentials),
}

impl SessionState {
    /// `true` for both `Active` and `PendingPasswordReset`.
    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }

    /// `true` only while a first-login password change is owed.
    pub fn is_pending_reset(&self) -> bool {
        matches!(self, SessionState::PendingPasswordReset(_))
    }

    /// The credentials, if anyone is logged in.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::Active(creds)
            | SessionState::PendingPasswordReset(creds) => Some(creds),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// A read-only view of the session for UI components (navbar, avatar,
/// guarded pages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub current_user: Option<User>,

    /// `true` until the startup restore has run.
    pub loading: bool,
}
