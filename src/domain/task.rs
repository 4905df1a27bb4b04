//! Task entity and its input record.

use super::{ColumnId, TaskId};
use crate::validation::{FieldRules, Rule, Validatable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit of work placed in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    column: ColumnId,
    position: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Storage-assigned identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Column currently holding the task.
    pub column: ColumnId,
    /// Ordering key, unique per column.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            column: data.column,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the column holding the task.
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        self.column
    }

    /// Returns the ordering position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
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

/// Writable task fields, used for both creation and full-replace updates.
///
/// An update may move the task to another column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Task name, 1 to 500 characters.
    pub name: String,
    /// Task description, at most 5000 characters.
    #[serde(default)]
    pub description: String,
    /// Column holding the task.
    pub column: ColumnId,
    /// Ordering position; zero is treated as missing.
    pub position: f64,
}

impl TaskInput {
    /// Creates a task input with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>, column: ColumnId, position: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            column,
            position,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Validatable for TaskInput {
    const RULES: &'static [FieldRules] = &[
        FieldRules::new("name", &[Rule::MinLength(1), Rule::MaxLength(500)]),
        FieldRules::new("description", &[Rule::MaxLength(5000)]),
        FieldRules::new("column", &[Rule::NumericRequired]),
        FieldRules::new("position", &[Rule::NumericRequired]),
    ];
}
