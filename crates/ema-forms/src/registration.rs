//! The registration form's fields and rules.

use crate::form::{Field, FieldErrors, FieldValues};
use crate::rules::{self, MIN_PASSWORD_LEN};
use crate::ValidationError;

/// The fields of the parent registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    FirstName,
    LastName,
    Prefix,
    Phone,
    Email,
    Password,
    ConfirmPassword,
}

impl Field for RegistrationField {}

impl RegistrationField {
    pub const ALL: [RegistrationField; 7] = [
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::Prefix,
        RegistrationField::Phone,
        RegistrationField::Email,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
    ];
}

/// Checks every registration rule and returns the violations.
///
/// An empty map means the form can be submitted. Each field reports at
/// most one error: the "required" check runs first, the format check only
/// on a non-empty value.
///
/// | Field | Rule |
/// |---|---|
/// | first / last name | not blank |
/// | prefix | not blank, then `+` and 1-4 digits |
/// | phone | not blank, then 6-15 digits |
/// | email | not empty, then `something@something.something` |
/// | password | not empty, then at least 6 characters |
/// | confirm | equal to password |
///
/// Formats are checked against the raw value, so `" +502"` is blank-free
/// but still an invalid prefix.
pub fn validate_registration(
    values: &FieldValues<RegistrationField>,
) -> FieldErrors<RegistrationField> {
    use RegistrationField as F;

    let mut errors = FieldErrors::new();

    if rules::is_blank(values.get(F::FirstName)) {
        errors.insert(F::FirstName, ValidationError::FirstNameRequired);
    }

    if rules::is_blank(values.get(F::LastName)) {
        errors.insert(F::LastName, ValidationError::LastNameRequired);
    }

    let prefix = values.get(F::Prefix);
    if rules::is_blank(prefix) {
        errors.insert(F::Prefix, ValidationError::PrefixRequired);
    } else if !rules::is_valid_prefix(prefix) {
        errors.insert(F::Prefix, ValidationError::InvalidPrefix);
    }

    let phone = values.get(F::Phone);
    if rules::is_blank(phone) {
        errors.insert(F::Phone, ValidationError::PhoneRequired);
    } else if !rules::is_valid_phone(phone) {
        errors.insert(F::Phone, ValidationError::InvalidPhone);
    }

    let email = values.get(F::Email);
    if email.is_empty() {
        errors.insert(F::Email, ValidationError::EmailRequired);
    } else if !rules::is_valid_email(email) {
        errors.insert(F::Email, ValidationError::InvalidEmail);
    }

    let password = values.get(F::Password);
    if password.is_empty() {
        errors.insert(F::Password, ValidationError::PasswordRequired);
    } else if rules::char_len(password) < MIN_PASSWORD_LEN {
        errors.insert(F::Password, ValidationError::PasswordTooShort);
    }

    if values.get(F::ConfirmPassword) != password {
        errors.insert(F::ConfirmPassword, ValidationError::PasswordMismatch);
    }

    errors
}
