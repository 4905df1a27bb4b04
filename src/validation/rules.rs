//! Declarative per-field rules.
//!
//! Rules run against the record's serialized form, so field names follow
//! the serde name of each field.

use super::FieldError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Single constraint applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty: not null, not an empty
    /// string or collection, not zero, not `false`.
    Required,
    /// Text must contain at least this many characters. A null value
    /// counts as empty text.
    MinLength(usize),
    /// Text must contain at most this many characters.
    MaxLength(usize),
    /// The field must be a non-zero number.
    NumericRequired,
}

impl Rule {
    fn check(self, field: &str, value: Option<&Value>) -> Option<FieldError> {
        let passed = match self {
            Self::Required => is_present(value),
            Self::MinLength(min) => text_length(value).is_none_or(|length| length >= min),
            Self::MaxLength(max) => text_length(value).is_none_or(|length| length <= max),
            Self::NumericRequired => is_non_zero_number(value),
        };
        (!passed).then(|| FieldError::new(field, self.message(field)))
    }

    fn message(self, field: &str) -> String {
        match self {
            Self::Required | Self::NumericRequired => format!("{field} is required"),
            Self::MinLength(min) => format!("{field} must be of {min} symbols min"),
            Self::MaxLength(max) => format!("{field} must be of {max} symbols max"),
        }
    }
}

/// Rules attached to one serialized field, checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    field: &'static str,
    rules: &'static [Rule],
}

impl FieldRules {
    /// Declares the rules for `field`.
    #[must_use]
    pub const fn new(field: &'static str, rules: &'static [Rule]) -> Self {
        Self { field, rules }
    }

    /// Returns the serialized field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub const fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Returns the first failing rule for this field, if any. A field
    /// reports at most one error.
    pub(crate) fn first_failure(&self, record: &Map<String, Value>) -> Option<FieldError> {
        let value = record.get(self.field);
        self.rules
            .iter()
            .find_map(|rule| rule.check(self.field, value))
    }
}

/// A record type with a static rule table.
pub trait Validatable: Serialize {
    /// Rules checked by [`crate::validation::Validator::validate`], in
    /// output order.
    const RULES: &'static [FieldRules];
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

fn is_non_zero_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(number)) if number.as_f64().is_some_and(|n| n != 0.0))
}

/// Character count of a text value; `None` when the rule does not apply.
fn text_length(value: Option<&Value>) -> Option<usize> {
    match value {
        None | Some(Value::Null) => Some(0),
        Some(Value::String(text)) => Some(text.chars().count()),
        Some(_) => None,
    }
}
