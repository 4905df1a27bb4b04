//! Service error vocabulary and its delivery-facing classification.

use crate::domain::FilterNotAllowed;
use crate::ports::StorageError;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors returned by the domain services.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Input failed field validation; no storage call was made.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Storage rejected or failed the operation.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A listing used a filter key outside the entity's allow-list.
    #[error(transparent)]
    Filter(#[from] FilterNotAllowed),

    /// The column is the only one left on its board.
    #[error("the last column can not be deleted")]
    LastColumn,

    /// No neighbouring column could receive the deleted column's tasks.
    #[error("target column for tasks transfer not found")]
    TargetColumnNotFound,
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Flattens the error into the stable kind vocabulary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Filter(_) => ErrorKind::FilterNotAllowed,
            Self::LastColumn => ErrorKind::LastColumn,
            Self::TargetColumnNotFound => ErrorKind::TargetColumnNotFound,
            Self::Storage(storage) => match storage {
                StorageError::NotFound => ErrorKind::RecordNotFound,
                StorageError::RecordAlreadyExist => ErrorKind::RecordAlreadyExist,
                StorageError::NameDuplicate => ErrorKind::NameDuplicate,
                StorageError::PositionDuplicate => ErrorKind::PositionDuplicate,
                StorageError::BoardRelation => ErrorKind::BoardRelation,
                StorageError::ColumnRelation => ErrorKind::ColumnRelation,
                StorageError::TaskRelation => ErrorKind::TaskRelation,
                StorageError::TransactionFinished | StorageError::Persistence(_) => {
                    ErrorKind::Internal
                }
            },
        }
    }

    /// Returns the field errors when validation failed.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Stable error kinds exposed to the delivery layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Field validation failed.
    ValidationFailed,
    /// The addressed record does not exist.
    RecordNotFound,
    /// The record already exists.
    RecordAlreadyExist,
    /// A sibling already uses the name.
    NameDuplicate,
    /// A sibling already occupies the position.
    PositionDuplicate,
    /// The referenced board does not exist.
    BoardRelation,
    /// The referenced column does not exist.
    ColumnRelation,
    /// The referenced task does not exist.
    TaskRelation,
    /// The last column of a board cannot be deleted.
    LastColumn,
    /// No column could receive reassigned tasks.
    TargetColumnNotFound,
    /// A filter key is outside the allow-list.
    FilterNotAllowed,
    /// Unclassified failure.
    Internal,
}

/// Transport-level response class for an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseClass {
    /// The addressed resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// The request is malformed or references missing records.
    BadRequest,
    /// The failure is not the caller's fault.
    Internal,
}

impl ErrorKind {
    /// Returns the single stable message for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation failed",
            Self::RecordNotFound => "record was not found",
            Self::RecordAlreadyExist => "record already exists",
            Self::NameDuplicate => "a record with this name already exists",
            Self::PositionDuplicate => "this position has been already taken",
            Self::BoardRelation => "a board with the provided ID was not found",
            Self::ColumnRelation => "a column with the provided ID was not found",
            Self::TaskRelation => "a task with the provided ID was not found",
            Self::LastColumn => "the last column can not be deleted",
            Self::TargetColumnNotFound => "target column for tasks transfer not found",
            Self::FilterNotAllowed => "filter demand is not allowed",
            Self::Internal => "internal error",
        }
    }

    /// Returns the response class the delivery layer should use.
    #[must_use]
    pub const fn response_class(self) -> ResponseClass {
        match self {
            Self::RecordNotFound => ResponseClass::NotFound,
            Self::NameDuplicate | Self::PositionDuplicate => ResponseClass::Conflict,
            Self::ValidationFailed
            | Self::RecordAlreadyExist
            | Self::BoardRelation
            | Self::ColumnRelation
            | Self::TaskRelation
            | Self::LastColumn
            | Self::FilterNotAllowed => ResponseClass::BadRequest,
            Self::TargetColumnNotFound | Self::Internal => ResponseClass::Internal,
        }
    }
}
