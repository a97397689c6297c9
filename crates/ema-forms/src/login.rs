//! The login form's rule.

use crate::rules;
use crate::ValidationError;

/// Checks a login attempt before it's sent.
///
/// Both fields must be non-empty, then the email must look like an email.
/// Values are not trimmed.
///
/// # Errors
/// - [`ValidationError::MissingCredentials`]: either field is empty
/// - [`ValidationError::InvalidEmail`]: email doesn't match the pattern
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if !rules::is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
