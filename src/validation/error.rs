//! Structured validation failures.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Message reported when the validated value is not a record.
pub const INVALID_INPUT_MESSAGE: &str = "invalid input dataset";

/// A single failed rule, keyed by the field's serialized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the serialized field name; empty for record-level failures.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Ordered list of field errors with a fixed top-level message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed")]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps the given field errors.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Returns the single synthetic error used for non-record input and
    /// for rule tables that do not match the record.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::new(vec![FieldError::new("", INVALID_INPUT_MESSAGE)])
    }

    /// Returns the field errors in rule declaration order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the number of field errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no field error is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
