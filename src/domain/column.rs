//! Column entity and its input records.

use super::{BoardId, ColumnId};
use crate::validation::{FieldRules, Rule, Validatable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the column created alongside every new board.
pub const DEFAULT_COLUMN_NAME: &str = "Default";

/// Position of the column created alongside every new board.
pub const DEFAULT_POSITION: f64 = 1000.0;

/// Ordered stage within a board. Positions are unique per board and only
/// used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    name: String,
    board: BoardId,
    position: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedColumnData {
    /// Storage-assigned identifier.
    pub id: ColumnId,
    /// Column name, unique per board.
    pub name: String,
    /// Owning board.
    pub board: BoardId,
    /// Ordering key, unique per board.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            board: data.board,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board(&self) -> BoardId {
        self.board
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

/// Fields required to create a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// Column name, 1 to 255 characters.
    pub name: String,
    /// Owning board.
    pub board: BoardId,
    /// Ordering position; zero is treated as missing.
    pub position: f64,
}

impl ColumnInput {
    /// Creates a column input.
    #[must_use]
    pub fn new(name: impl Into<String>, board: BoardId, position: f64) -> Self {
        Self {
            name: name.into(),
            board,
            position,
        }
    }

    /// Returns the input for the default column of `board`.
    #[must_use]
    pub fn default_for(board: BoardId) -> Self {
        Self::new(DEFAULT_COLUMN_NAME, board, DEFAULT_POSITION)
    }
}

impl Validatable for ColumnInput {
    const RULES: &'static [FieldRules] = &[
        FieldRules::new("name", &[Rule::MinLength(1), Rule::MaxLength(255)]),
        FieldRules::new("board", &[Rule::NumericRequired]),
        FieldRules::new("position", &[Rule::NumericRequired]),
    ];
}

/// Replacement values for an existing column. The owning board is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChanges {
    /// New column name, 1 to 255 characters.
    pub name: String,
    /// New ordering position; zero is treated as missing.
    pub position: f64,
}

impl ColumnChanges {
    /// Creates a column replacement.
    #[must_use]
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

impl Validatable for ColumnChanges {
    const RULES: &'static [FieldRules] = &[
        FieldRules::new("name", &[Rule::MinLength(1), Rule::MaxLength(255)]),
        FieldRules::new("position", &[Rule::NumericRequired]),
    ];
}
