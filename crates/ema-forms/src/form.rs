//! Form state: what the user typed, and what's wrong with it.
//!
//! Values and errors are two independent maps keyed by field. Editing a
//! field clears only that field's error; errors are recomputed wholesale
//! by a validator on submit. Nothing in here validates as you type.

use std::collections::BTreeMap;
use std::fmt;

use crate::ValidationError;

/// A field identifier for some form.
///
/// Implemented by small `Copy` enums (`RegistrationField`, ...). `Ord` keeps
/// error maps in declaration order, which is also display order.
pub trait Field: Copy + Ord + fmt::Debug {}

/// Field → error. Empty means the form is valid.
pub type FieldErrors<F> = BTreeMap<F, ValidationError>;

/// Field → current value. Fields never edited are absent and read as `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues<F: Field> {
    values: BTreeMap<F, String>,
}

impl<F: Field> FieldValues<F> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// The current value of `field`, `""` if never set.
    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// `true` if every field is empty (or was never touched).
    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<F: Field> Default for FieldValues<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Values plus per-field errors for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<F: Field> {
    values: FieldValues<F>,
    errors: FieldErrors<F>,
}

impl<F: Field> FormState<F> {
    /// An empty form with no errors.
    pub fn new() -> Self {
        Self {
            values: FieldValues::new(),
            errors: FieldErrors::new(),
        }
    }

    /// Records an edit. The field's own error (if any) goes away; other
    /// fields' errors stay until the next submit.
    pub fn edit(&mut self, field: F, value: impl Into<String>) {
        self.values.set(field, value);
        self.errors.remove(&field);
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FieldValues<F> {
        &self.values
    }

    pub fn error(&self, field: F) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &FieldErrors<F> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Replaces all errors with a fresh validation result.
    pub fn set_errors(&mut self, errors: FieldErrors<F>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Back to a blank form: values and errors both cleared.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

impl<F: Field> Default for FormState<F> {
    fn default() -> Self {
        Self::new()
    }
}
