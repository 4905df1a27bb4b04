//! Board aggregate and its input record.

use super::BoardId;
use crate::validation::{FieldRules, Rule, Validatable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level container holding an ordered set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Storage-assigned identifier.
    pub id: BoardId,
    /// Board name.
    pub name: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the board description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Writable board fields, used for both creation and full-replace updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInput {
    /// Board name, 1 to 500 characters.
    pub name: String,
    /// Board description, at most 1000 characters.
    #[serde(default)]
    pub description: String,
}

impl BoardInput {
    /// Creates an input with the given name and an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Validatable for BoardInput {
    const RULES: &'static [FieldRules] = &[
        FieldRules::new("name", &[Rule::MinLength(1), Rule::MaxLength(500)]),
        FieldRules::new("description", &[Rule::MaxLength(1000)]),
    ];
}
