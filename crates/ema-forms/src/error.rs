//! Validation errors: one variant per message a user can see.

/// A single failed rule.
///
/// `Display` is the user-facing message, so a form can render
/// `error.to_string()` next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    // -- registration -----------------------------------------------------
    #[error("first name is required")]
    FirstNameRequired,

    #[error("last name is required")]
    LastNameRequired,

    #[error("prefix is required")]
    PrefixRequired,

    /// Prefix must be `+` followed by 1 to 4 digits.
    #[error("invalid prefix")]
    InvalidPrefix,

    #[error("phone is required")]
    PhoneRequired,

    /// Phone must be 6 to 15 digits, nothing else.
    #[error("invalid phone")]
    InvalidPhone,

    #[error("email is required")]
    EmailRequired,

    #[error("invalid email")]
    InvalidEmail,

    #[error("password is required")]
    PasswordRequired,

    #[error("must be at least 6 characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,

    // -- login ------------------------------------------------------------
    /// Email or password left empty on the login form.
    #[error("please complete all fields")]
    MissingCredentials,

    // -- password change --------------------------------------------------
    #[error("complete all fields")]
    IncompleteFields,

    #[error("new password must be at least 8 characters")]
    NewPasswordTooShort,
}
