//! Form state and validation for the EMA portal.
//!
//! Everything here is pure: no I/O, no async, no logging. Validators take
//! values and return errors; the flows in the `ema` crate decide what to
//! do with them.
//!
//! - [`FormState`]: values + per-field errors, edit-clears-error
//! - [`validate_registration`]: the parent sign-up form
//! - [`validate_login`]: the login form
//! - [`validate_password_change`]: the first-login password dialog

mod error;
mod form;
mod login;
mod password;
mod registration;
pub mod rules;

pub use error::ValidationError;
pub use form::{Field, FieldErrors, FieldValues, FormState};
pub use login::validate_login;
pub use password::validate_password_change;
pub use registration::{RegistrationField, validate_registration};
