//! The session manager: the single source of truth for "who is logged in".
//!
//! It's responsible for:
//! - Restoring a session from storage at startup
//! - Persisting credentials to the scope chosen at login
//! - Tracking the first-login password-reset obligation
//! - Clearing everything on logout
//!
//! # Concurrency note
//!
//! `SessionManager` is NOT thread-safe by itself. It's constructed once at
//! application start and owned by the portal, which puts it behind a mutex
//! and hands out snapshots. Keeping it plain here keeps every method
//! synchronous and trivially testable.

use ema_protocol::{Codec, JsonCodec, User};
use ema_storage::{ScopedStorage, StorageScope, TOKEN_KEY, USER_KEY};

use crate::{
    Credentials, ScopePolicy, SessionConfig, SessionError, SessionSnapshot,
    SessionState,
};

/// Owns the authentication state and its dual-scope persistence.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ restore() ──→ login() / login_pending_reset()
///   │            │                  │
///   ▼            ▼                  ▼
/// [loading]  [LoggedOut|Active]  [Active|PendingPasswordReset]
///                                   │
///                                   ▼
///                          complete_password_reset() ──→ [Active]
///
/// logout() from anywhere ──→ [LoggedOut]
/// ```
pub struct SessionManager {
    state: SessionState,

    /// `true` from construction until the first `restore()` finishes.
    loading: bool,

    storage: ScopedStorage,
    config: SessionConfig,
    codec: JsonCodec,
}

impl SessionManager {
    /// Creates a manager over the given storage scopes.
    ///
    /// The session starts logged out and loading; call
    /// [`restore()`](Self::restore) once at startup.
    pub fn new(storage: ScopedStorage, config: SessionConfig) -> Self {
        Self {
            state: SessionState::LoggedOut,
            loading: true,
            storage,
            config,
            codec: JsonCodec,
        }
    }

    /// Reads persisted credentials and, if they're usable, becomes
    /// authenticated.
    ///
    /// `token` and `user` are each looked up in the persistent scope first,
    /// then in the session scope. Both must be present. A user record that
    /// doesn't parse is treated as corrupted state: everything is cleared
    /// via [`logout()`](Self::logout). Storage failures are handled the same
    /// way. Nothing here is ever returned as an error.
    ///
    /// Always ends with `loading == false`.
    pub fn restore(&mut self) {
        match self.read_persisted() {
            Ok(Some(creds)) => {
                tracing::info!(
                    user_id = %creds.user.id,
                    scope = %creds.scope,
                    "session restored"
                );
                self.state = SessionState::Active(creds);
            }
            Ok(None) => {
                tracing::debug!("no persisted session found");
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted session unusable, clearing");
                self.logout();
            }
        }
        self.loading = false;
    }

    /// Logs a user in and persists their credentials.
    ///
    /// `remember == true` writes to the persistent scope, otherwise to the
    /// session scope. What happens to the other scope depends on the
    /// configured [`ScopePolicy`].
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the credentials couldn't be
    /// written. The in-memory state is left unchanged in that case, and
    /// whatever was already written to the chosen scope is removed again.
    pub fn login(
        &mut self,
        user: User,
        token: String,
        remember: bool,
    ) -> Result<(), SessionError> {
        let creds = self.persist(user, token, remember)?;
        tracing::info!(user_id = %creds.user.id, scope = %creds.scope, "logged in");
        self.state = SessionState::Active(creds);
        self.loading = false;
        Ok(())
    }

    /// Like [`login()`](Self::login), but for an account the server
    /// flagged as first login: credentials are persisted immediately and the
    /// session enters `PendingPasswordReset`.
    ///
    /// # Errors
    /// Same as [`login()`](Self::login).
    pub fn login_pending_reset(
        &mut self,
        user: User,
        token: String,
        remember: bool,
    ) -> Result<(), SessionError> {
        let creds = self.persist(user, token, remember)?;
        tracing::info!(
            user_id = %creds.user.id,
            scope = %creds.scope,
            "logged in, password reset pending"
        );
        self.state = SessionState::PendingPasswordReset(creds);
        self.loading = false;
        Ok(())
    }

    /// Leaves `PendingPasswordReset` for `Active` after the server accepted
    /// the new password.
    ///
    /// The cached user's first-login flag is cleared and the stored `user`
    /// record in the login scope is rewritten. The in-memory transition
    /// happens even if that rewrite fails.
    ///
    /// # Errors
    /// - [`SessionError::NotPendingReset`]: no reset was pending; nothing
    ///   changes
    /// - [`SessionError::Storage`] / [`SessionError::UserRecord`]: the
    ///   stored record couldn't be updated
    pub fn complete_password_reset(&mut self) -> Result<(), SessionError> {
        let mut creds = match &self.state {
            SessionState::PendingPasswordReset(creds) => creds.clone(),
            _ => return Err(SessionError::NotPendingReset),
        };
        creds.user.is_first_login = false;

        let write = self
            .codec
            .encode_str(&creds.user)
            .map_err(SessionError::from)
            .and_then(|json| {
                self.storage
                    .scope(creds.scope)
                    .set(USER_KEY, &json)
                    .map_err(SessionError::from)
            });

        tracing::info!(user_id = %creds.user.id, "password reset completed");
        self.state = SessionState::Active(creds);
        write
    }

    /// Removes `token` and `user` from BOTH scopes and logs out.
    ///
    /// Safe to call when already logged out. Storage failures are logged
    /// and skipped: the in-memory state is reset no matter what.
    pub fn logout(&mut self) {
        for scope in [StorageScope::Persistent, StorageScope::Session] {
            for key in [TOKEN_KEY, USER_KEY] {
                if let Err(e) = self.storage.scope(scope).remove(key) {
                    tracing::warn!(%scope, key, error = %e, "failed to clear stored credential");
                }
            }
        }

        if let Some(creds) = self.state.credentials() {
            tracing::info!(user_id = %creds.user.id, "logged out");
        }
        self.state = SessionState::LoggedOut;
    }

    /// Returns a read-only view: authenticated flag, current user, loading.
    pub fn current_session(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.state.is_authenticated(),
            current_user: self.user().cloned(),
            loading: self.loading,
        }
    }

    /// The full session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.state.credentials().map(|c| &c.user)
    }

    /// The auth token, if anyone is logged in.
    pub fn token(&self) -> Option<&str> {
        self.state.credentials().map(|c| c.token.as_str())
    }

    /// `true` until the startup restore has run.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The underlying storage scopes.
    pub fn storage(&self) -> &ScopedStorage {
        &self.storage
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // -- internals --------------------------------------------------------

    /// Writes token + user to the scope chosen by `remember`, applying the
    /// scope policy to the other scope.
    fn persist(
        &self,
        user: User,
        token: String,
        remember: bool,
    ) -> Result<Credentials, SessionError> {
        let scope = StorageScope::from_remember(remember);
        let user_json = self.codec.encode_str(&user)?;

        if let Err(e) = self.write_scopes(scope, &token, &user_json) {
            self.rollback(scope);
            return Err(e);
        }

        Ok(Credentials { user, token, scope })
    }

    fn write_scopes(
        &self,
        scope: StorageScope,
        token: &str,
        user_json: &str,
    ) -> Result<(), SessionError> {
        let store = self.storage.scope(scope);
        store.set(TOKEN_KEY, token)?;
        store.set(USER_KEY, user_json)?;

        if self.config.scope_policy == ScopePolicy::ClearOtherScope {
            let other = self.storage.scope(scope.other());
            other.remove(TOKEN_KEY)?;
            other.remove(USER_KEY)?;
        }
        Ok(())
    }

    /// Best-effort removal of a half-written login from `scope`.
    fn rollback(&self, scope: StorageScope) {
        let store = self.storage.scope(scope);
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = store.remove(key) {
                tracing::warn!(%scope, key, error = %e, "could not roll back login write");
            }
        }
    }

    /// Reads credentials back, with persistent-then-session fallback for
    /// each key independently.
    fn read_persisted(&self) -> Result<Option<Credentials>, SessionError> {
        let token = self.storage.get_first(TOKEN_KEY)?;
        let user = self.storage.get_first(USER_KEY)?;

        let (Some((token, _)), Some((user_json, scope))) = (token, user) else {
            return Ok(None);
        };

        let user: User = self.codec.decode_str(&user_json)?;
        Ok(Some(Credentials { user, token, scope }))
    }
}

// =========================================================================
// Tests
// =========================================================================
