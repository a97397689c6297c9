//! User-facing texts produced by the flows (validation texts live on
//! [`ValidationError`](ema_forms::ValidationError)).

/// Transport failure or an unreadable answer, on any form.
pub const CONNECTION_ERROR: &str = "could not connect to the server";

/// Login rejected without a server message.
pub const LOGIN_FAILED: &str = "login failed";

/// Registration rejected without a server message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Registration accepted.
pub const REGISTRATION_SUCCESS: &str = "registration successful! welcome.";

/// Password change accepted.
pub const PASSWORD_UPDATED: &str = "password updated successfully";

/// Password change rejected without a server message.
pub const PASSWORD_UPDATE_FAILED: &str = "could not update password";

/// Greeting shown after a normal login.
pub fn welcome(display_name: &str) -> String {
    format!("Welcome, {display_name}!")
}
