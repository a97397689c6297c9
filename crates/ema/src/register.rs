//! The parent registration form and its flow.

use ema_client::{ApiError, AuthApi};
use ema_forms::{FieldErrors, FormState, RegistrationField, ValidationError, validate_registration};
use ema_protocol::{RegisterRequest, Role};
use tokio::sync::watch;

use crate::messages::{CONNECTION_ERROR, REGISTRATION_SUCCESS, UNKNOWN_ERROR};
use crate::ports::{Navigator, Notifier};
use crate::status::Published;
use crate::Portal;

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// At least one field broke a rule; nothing was sent.
    Invalid,

    /// The server refused or couldn't be reached. The message is the
    /// form-level error; fields are kept.
    Rejected(String),

    /// Account created; the form is blank again.
    Registered,
}

/// Field values, field errors, and the form-level status lines.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    state: FormState<RegistrationField>,
    submitting: Published<bool>,
    api_error: Option<String>,
    success: Option<String>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an edit and clears that field's error.
    pub fn edit(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.state.edit(field, value);
    }

    pub fn value(&self, field: RegistrationField) -> &str {
        self.state.value(field)
    }

    pub fn error(&self, field: RegistrationField) -> Option<ValidationError> {
        self.state.error(field)
    }

    pub fn errors(&self) -> &FieldErrors<RegistrationField> {
        self.state.errors()
    }

    /// The form-level error from the last submit.
    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    /// The confirmation from the last successful submit.
    pub fn success_message(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// `true` while the register request is in flight. Only observable
    /// through [`watch_submitting()`](Self::watch_submitting) during a
    /// submit, since `submit` holds the form.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// A receiver for the submitting flag, for disabling the submit
    /// control while a request runs.
    pub fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Validates every field and, if all pass, registers a parent account.
    pub async fn submit<A, N, T>(&mut self, portal: &Portal<A, N, T>) -> RegisterOutcome
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        self.state.clear_errors();
        self.api_error = None;
        self.success = None;

        let errors = validate_registration(self.state.values());
        if !errors.is_empty() {
            tracing::debug!(invalid_fields = errors.len(), "registration invalid");
            self.state.set_errors(errors);
            return RegisterOutcome::Invalid;
        }

        let request = self.request();

        let in_flight = self.submitting.begin();
        let result = portal.api().register(&request).await;
        drop(in_flight);

        match result {
            Ok(_) => {
                tracing::info!(role = %request.role, "registration accepted");
                self.state.reset();
                self.success = Some(REGISTRATION_SUCCESS.to_string());
                RegisterOutcome::Registered
            }
            Err(e) => {
                tracing::info!(error = %e, "registration failed");
                let message = failure_message(&e);
                self.api_error = Some(message.clone());
                RegisterOutcome::Rejected(message)
            }
        }
    }

    /// Every self-registered account is a parent; the phone is the prefix
    /// and the local number run together.
    fn request(&self) -> RegisterRequest {
        use RegistrationField as F;

        RegisterRequest {
            name: self.value(F::FirstName).to_string(),
            last_name: self.value(F::LastName).to_string(),
            phone: format!("{}{}", self.value(F::Prefix), self.value(F::Phone)),
            email: self.value(F::Email).to_string(),
            password: self.value(F::Password).to_string(),
            role: Role::Parent,
        }
    }
}

fn failure_message(error: &ApiError) -> String {
    match error.server_message() {
        Some(message) => message.to_string(),
        None if error.is_rejected() => UNKNOWN_ERROR.to_string(),
        None => CONNECTION_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RegistrationField as F;

    #[test]
    fn test_request_joins_prefix_and_phone_as_parent() {
        let mut form = RegistrationForm::new();
        form.edit(F::FirstName, "Ana");
        form.edit(F::LastName, "López");
        form.edit(F::Prefix, "+502");
        form.edit(F::Phone, "55551234");
        form.edit(F::Email, "ana@ema.com");
        form.edit(F::Password, "clave123");

        let request = form.request();

        assert_eq!(request.phone, "+50255551234");
        assert_eq!(request.name, "Ana");
        assert_eq!(request.last_name, "López");
        assert_eq!(request.role, Role::Parent);
    }

    #[test]
    fn test_failure_message_rejection_without_text_is_unknown_error() {
        let err = ApiError::Rejected {
            status: 500,
            message: None,
            code: None,
        };

        assert_eq!(failure_message(&err), UNKNOWN_ERROR);
    }
}
