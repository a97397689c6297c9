//! The individual field rules, shared by every validator in this crate.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum length of the replacement password on first login.
pub const MIN_NEW_PASSWORD_LEN: usize = 8;

// Literal patterns, exercised by the tests below.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));
static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{1,4}$").expect("prefix pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6,15}$").expect("phone pattern"));

/// Something, then `@`, then something containing a dot. No whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// `+` followed by 1 to 4 ASCII digits, e.g. `+502`.
pub fn is_valid_prefix(value: &str) -> bool {
    PREFIX.is_match(value)
}

/// 6 to 15 ASCII digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length in characters, not bytes: "contraseña" is 10.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
