//! Storage error vocabulary shared by every persistence port.

use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence port operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by storage adapters.
///
/// Adapters translate engine-specific constraint violations into the
/// classified variants. Anything they cannot classify is wrapped in
/// [`StorageError::Persistence`].
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The addressed row does not exist.
    #[error("record was not found")]
    NotFound,

    /// A row with the same primary key already exists.
    #[error("record already exists")]
    RecordAlreadyExist,

    /// A sibling with the same name already exists.
    #[error("a record with this name already exists")]
    NameDuplicate,

    /// A sibling already occupies the requested position.
    #[error("this position has been already taken")]
    PositionDuplicate,

    /// The referenced board does not exist.
    #[error("a board with the provided ID was not found")]
    BoardRelation,

    /// The referenced column does not exist.
    #[error("a column with the provided ID was not found")]
    ColumnRelation,

    /// The referenced task does not exist.
    #[error("a task with the provided ID was not found")]
    TaskRelation,

    /// The transaction was already committed or rolled back.
    #[error("transaction has already been finished")]
    TransactionFinished,

    /// Unclassified persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
