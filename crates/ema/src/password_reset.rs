//! The first-login password-change dialog.
//!
//! A user whose account is flagged as first login is logged in but owes a
//! new password. This dialog collects it, validates it, sends it, and on
//! success lifts the session out of `PendingPasswordReset`.

use ema_client::{ApiError, AuthApi};
use ema_forms::{ValidationError, validate_password_change};
use ema_protocol::UpdatePasswordRequest;
use ema_session::SessionState;
use tokio::sync::watch;

use crate::messages::{CONNECTION_ERROR, PASSWORD_UPDATED, PASSWORD_UPDATE_FAILED};
use crate::ports::{Navigator, Notifier, Route};
use crate::status::Published;
use crate::Portal;

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// A rule failed; nothing was sent. The error is also on the dialog.
    Invalid(ValidationError),

    /// The server refused or couldn't be reached. The message was shown
    /// through the notifier; the dialog stays open.
    Rejected(String),

    /// Password changed, session is `Active`, user sent home.
    Completed,

    /// The session isn't waiting for a reset any more (logged out, or
    /// already completed). Nothing was sent.
    NoPendingSession,
}

/// The three password fields plus the dialog's error line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetDialog {
    current: String,
    new: String,
    confirm: String,
    error: Option<ValidationError>,
    submitting: Published<bool>,
}

impl PasswordResetDialog {
    /// A blank dialog. Opening always starts blank.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current(&mut self, value: impl Into<String>) {
        self.current = value.into();
        self.error = None;
    }

    pub fn set_new(&mut self, value: impl Into<String>) {
        self.new = value.into();
        self.error = None;
    }

    pub fn set_confirm(&mut self, value: impl Into<String>) {
        self.confirm = value.into();
        self.error = None;
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn new_password(&self) -> &str {
        &self.new
    }

    pub fn confirm(&self) -> &str {
        &self.confirm
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// A receiver for the submitting flag while `submit` holds the dialog.
    pub fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Validates, sends the change, and finishes the reset on success.
    pub async fn submit<A, N, T>(&mut self, portal: &Portal<A, N, T>) -> ResetOutcome
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        if let Err(e) = validate_password_change(&self.current, &self.new, &self.confirm) {
            self.error = Some(e);
            return ResetOutcome::Invalid(e);
        }
        self.error = None;

        let pending_user = portal
            .with_session(|s| match s.state() {
                SessionState::PendingPasswordReset(creds) => Some(creds.user.id),
                _ => None,
            })
            .await;
        let Some(user_id) = pending_user else {
            tracing::debug!("password change submitted without a pending reset");
            return ResetOutcome::NoPendingSession;
        };

        let request = UpdatePasswordRequest {
            user_id,
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        };

        let in_flight = self.submitting.begin();
        let result = portal.api().update_password(&request).await;
        drop(in_flight);

        if let Err(e) = result {
            let message = failure_message(&e);
            tracing::info!(%user_id, error = %e, "password change failed");
            portal.notifier().notify(&message);
            return ResetOutcome::Rejected(message);
        }

        if let Err(e) = portal.with_session(|s| s.complete_password_reset()).await {
            // The server already accepted the new password.
            tracing::warn!(%user_id, error = %e, "could not record completed reset");
        }

        portal.notifier().notify(PASSWORD_UPDATED);
        portal.navigator().navigate(Route::Home);
        ResetOutcome::Completed
    }
}

fn failure_message(error: &ApiError) -> String {
    match error.server_message() {
        Some(message) => message.to_string(),
        None if error.is_rejected() => PASSWORD_UPDATE_FAILED.to_string(),
        None => CONNECTION_ERROR.to_string(),
    }
}
