//! The login form and its flow.
//!
//! ```text
//! Idle ──submit──→ Validating ──ok──→ Submitting ──┬──→ Authenticated
//!   ↑                  │                           ├──→ AwaitingPasswordReset
//!   └──── invalid ─────┘                           └──→ Failed
//! ```
//!
//! A first login persists the credentials straight away and opens the
//! [`PasswordResetDialog`]; the form only reaches `Authenticated` once the
//! new password is accepted.

use ema_client::{ApiError, AuthApi};
use ema_forms::validate_login;
use ema_protocol::{LoginRequest, LoginResponse};
use tokio::sync::watch;

use crate::messages::{CONNECTION_ERROR, LOGIN_FAILED, welcome};
use crate::password_reset::{PasswordResetDialog, ResetOutcome};
use crate::ports::{Navigator, Notifier, Route};
use crate::status::Published;
use crate::Portal;

/// Where the login form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    /// Waiting for input. Also where a failed validation lands.
    #[default]
    Idle,

    /// Checking the fields locally.
    Validating,

    /// Request in flight.
    Submitting,

    /// Logged in and sent home.
    Authenticated,

    /// Logged in on a first-login account; a new password is owed.
    AwaitingPasswordReset,

    /// The server refused, or couldn't be reached. See [`LoginForm::error`].
    Failed,
}

/// Email, password, "remember me", and what happened last time.
///
/// `submit` takes `&mut self` for the whole request, so a form can't be
/// submitted twice at once, and the response always lands on a live form.
/// Use [`watch_phase()`](Self::watch_phase) to follow the form while a
/// submit is running.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    remember_me: bool,
    phase: Published<LoginPhase>,
    error: Option<String>,
    reset_dialog: Option<PasswordResetDialog>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// `true` keeps the login across restarts (persistent scope).
    pub fn set_remember_me(&mut self, remember: bool) {
        self.remember_me = remember;
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase.get()
    }

    /// A receiver that sees every phase change, including `Validating`
    /// and `Submitting` while `submit` holds the form.
    pub fn watch_phase(&self) -> watch::Receiver<LoginPhase> {
        self.phase.subscribe()
    }

    /// The message to show under the form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.phase() == LoginPhase::Submitting
    }

    /// The password-change dialog, while it's open.
    pub fn password_reset(&self) -> Option<&PasswordResetDialog> {
        self.reset_dialog.as_ref()
    }

    /// Mutable access for editing the dialog's fields.
    pub fn password_reset_mut(&mut self) -> Option<&mut PasswordResetDialog> {
        self.reset_dialog.as_mut()
    }

    /// Validates and logs in.
    ///
    /// Returns the phase the form ended in. Nothing is sent if validation
    /// fails, and nothing is persisted unless the server accepts.
    pub async fn submit<A, N, T>(&mut self, portal: &Portal<A, N, T>) -> LoginPhase
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        self.phase.set(LoginPhase::Validating);
        if let Err(e) = validate_login(&self.email, &self.password) {
            self.error = Some(e.to_string());
            self.phase.set(LoginPhase::Idle);
            return LoginPhase::Idle;
        }

        self.phase.set(LoginPhase::Submitting);
        let request = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match portal.api().login(&request).await {
            Ok(response) => self.accept(portal, response).await,
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                self.fail(failure_message(&e));
            }
        }
        self.phase()
    }

    /// Sends the dialog's password change. On success the dialog closes
    /// and the form becomes `Authenticated`.
    ///
    /// Without an open dialog this is a no-op reporting
    /// [`ResetOutcome::NoPendingSession`].
    pub async fn submit_password_change<A, N, T>(
        &mut self,
        portal: &Portal<A, N, T>,
    ) -> ResetOutcome
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        let Some(dialog) = self.reset_dialog.as_mut() else {
            return ResetOutcome::NoPendingSession;
        };

        let outcome = dialog.submit(portal).await;
        if outcome == ResetOutcome::Completed {
            self.reset_dialog = None;
            self.phase.set(LoginPhase::Authenticated);
        }
        outcome
    }

    /// Opens (or re-opens) the password dialog with blank fields.
    pub fn open_password_reset(&mut self) {
        self.reset_dialog = Some(PasswordResetDialog::new());
    }

    /// Closes the dialog without changing anything. The session stays
    /// logged in with the reset still pending.
    pub fn close_password_reset(&mut self) {
        self.reset_dialog = None;
    }

    // -- internals --------------------------------------------------------

    async fn accept<A, N, T>(&mut self, portal: &Portal<A, N, T>, response: LoginResponse)
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        let LoginResponse { user, token, .. } = response;
        let remember = self.remember_me;
        let first_login = user.is_first_login;
        let greeting = welcome(&user.display_name());

        let stored = portal
            .with_session(|s| {
                if first_login {
                    s.login_pending_reset(user, token, remember)
                } else {
                    s.login(user, token, remember)
                }
            })
            .await;

        if let Err(e) = stored {
            tracing::error!(error = %e, "could not store credentials");
            self.fail(LOGIN_FAILED.to_string());
            return;
        }

        self.error = None;
        if first_login {
            self.open_password_reset();
            self.phase.set(LoginPhase::AwaitingPasswordReset);
        } else {
            portal.notifier().notify(&greeting);
            portal.navigator().navigate(Route::Home);
            self.phase.set(LoginPhase::Authenticated);
        }
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.phase.set(LoginPhase::Failed);
    }
}

fn failure_message(error: &ApiError) -> String {
    match error.server_message() {
        Some(message) => message.to_string(),
        None if error.is_rejected() => LOGIN_FAILED.to_string(),
        None => CONNECTION_ERROR.to_string(),
    }
}
