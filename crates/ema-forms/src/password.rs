//! The first-login password-change rule.

use crate::rules::{self, MIN_NEW_PASSWORD_LEN};
use crate::ValidationError;

/// Checks a password change. The first failing rule wins:
///
/// 1. all three fields non-empty
/// 2. new password at least 8 characters
/// 3. new password and confirmation equal
///
/// # Errors
/// [`ValidationError::IncompleteFields`],
/// [`ValidationError::NewPasswordTooShort`] or
/// [`ValidationError::PasswordMismatch`], in that order of precedence.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(ValidationError::IncompleteFields);
    }
    if rules::char_len(new) < MIN_NEW_PASSWORD_LEN {
        return Err(ValidationError::NewPasswordTooShort);
    }
    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
