//! Constraint-name classification shared by the storage adapters.
//!
//! The persisted layout names every unique and foreign-key constraint.
//! Adapters report violations by name; this table turns the name into the
//! domain error. Names missing from the table are logged and kept as an
//! [`UnclassifiedViolation`] rather than dropped.

use crate::ports::StorageError;
use thiserror::Error;

/// Primary key of `boards`.
pub const BOARDS_PKEY: &str = "boards_pkey";
/// Primary key of `columns`.
pub const COLUMNS_PKEY: &str = "columns_pkey";
/// Primary key of `tasks`.
pub const TASKS_PKEY: &str = "tasks_pkey";
/// Primary key of `comments`.
pub const COMMENTS_PKEY: &str = "comments_pkey";
/// Unique `(board, name)` on `columns`.
pub const COLUMNS_NAME_BOARD_KEY: &str = "columns_name_board_key";
/// Unique `(board, position)` on `columns`.
pub const COLUMNS_POSITION_BOARD_KEY: &str = "columns_position_board_key";
/// Foreign key `columns.board -> boards.id`.
pub const COLUMNS_BOARD_FKEY: &str = "columns_board_fkey";
/// Foreign key `tasks.column -> columns.id`.
pub const TASKS_COLUMN_FKEY: &str = "tasks_column_fkey";
/// Unique `(column, position)` on `tasks`.
pub const TASKS_POSITION_COLUMN_KEY: &str = "tasks_position_column_key";
/// Foreign key `comments.task -> tasks.id`.
pub const COMMENTS_TASK_FKEY: &str = "comments_task_fkey";

/// Maps a constraint name to its domain error.
///
/// Returns `None` for names the table does not know.
#[must_use]
pub fn classify_constraint(name: &str) -> Option<StorageError> {
    let error = match name {
        BOARDS_PKEY | COLUMNS_PKEY | TASKS_PKEY | COMMENTS_PKEY => StorageError::RecordAlreadyExist,
        COLUMNS_NAME_BOARD_KEY => StorageError::NameDuplicate,
        COLUMNS_POSITION_BOARD_KEY | TASKS_POSITION_COLUMN_KEY => StorageError::PositionDuplicate,
        COLUMNS_BOARD_FKEY => StorageError::BoardRelation,
        TASKS_COLUMN_FKEY => StorageError::ColumnRelation,
        COMMENTS_TASK_FKEY => StorageError::TaskRelation,
        _ => return None,
    };
    Some(error)
}

/// Integrity violation the constraint table could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unclassified integrity violation on {}: {detail}", constraint.as_deref().unwrap_or("<unnamed>"))]
pub struct UnclassifiedViolation {
    constraint: Option<String>,
    detail: String,
}

impl UnclassifiedViolation {
    /// Returns the violated constraint name, when the engine reported one.
    #[must_use]
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    /// Returns the engine's description of the violation.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Classifies a violation reported by name, falling back to a logged
/// [`UnclassifiedViolation`] wrapped in [`StorageError::Persistence`].
#[must_use]
pub fn classify_violation(constraint: Option<&str>, detail: &str) -> StorageError {
    if let Some(error) = constraint.and_then(classify_constraint) {
        return error;
    }
    tracing::error!(
        constraint = constraint.unwrap_or_default(),
        detail,
        "unclassified integrity violation"
    );
    StorageError::persistence(UnclassifiedViolation {
        constraint: constraint.map(str::to_owned),
        detail: detail.to_owned(),
    })
}
