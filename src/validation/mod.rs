//! Validation engine for input records.
//!
//! Record types declare a static table of [`FieldRules`] through
//! [`Validatable`]. The [`Validator`] checks every field in one pass and
//! returns the failures as an ordered [`ValidationErrors`] list.

mod error;
mod rules;
mod service;
mod shape;

pub use error::{FieldError, INVALID_INPUT_MESSAGE, ValidationErrors};
pub use rules::{FieldRules, Rule, Validatable};
pub use service::Validator;
