//! Stateless validator applying rule tables to records.

use super::shape::{self, Shape};
use super::{FieldRules, Validatable, ValidationErrors};
use serde::Serialize;
use serde_json::Value;

/// Validates records against declarative field rules.
///
/// The validator holds no state, so one value can be copied freely across
/// services and threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator;

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates `record` against its own rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing one error per failing field, in
    /// rule declaration order.
    pub fn validate<T: Validatable + ?Sized>(&self, record: &T) -> Result<(), ValidationErrors> {
        self.validate_with(record, T::RULES)
    }

    /// Validates any serializable value against an explicit rule table.
    ///
    /// Every field is checked; a field reports only its first failing rule.
    /// Values that are not records (primitives, maps, sequences) yield a
    /// single synthetic error, as do rule tables naming a field the record
    /// does not serialize.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when any rule fails or the value is not
    /// a record.
    pub fn validate_with<T: Serialize + ?Sized>(
        &self,
        record: &T,
        rules: &[FieldRules],
    ) -> Result<(), ValidationErrors> {
        let found = shape::probe(record);
        if found != Shape::Record {
            tracing::error!(shape = ?found, "validator received a value that is not a record");
            return Err(ValidationErrors::invalid_input());
        }
        let fields = match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                tracing::error!(value = %other, "record did not serialize to an object");
                return Err(ValidationErrors::invalid_input());
            }
            Err(error) => {
                tracing::error!(error = %error, "record could not be serialized for validation");
                return Err(ValidationErrors::invalid_input());
            }
        };

        let unknown: Vec<_> = rules
            .iter()
            .map(FieldRules::field)
            .filter(|field| !fields.contains_key(*field))
            .collect();
        if !unknown.is_empty() {
            tracing::error!(
                fields = ?unknown,
                "rule table names fields the record does not serialize"
            );
            return Err(ValidationErrors::invalid_input());
        }

        let errors: Vec<_> = rules
            .iter()
            .filter_map(|field| field.first_failure(&fields))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}
