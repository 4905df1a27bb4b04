//! Persistence ports for boards, columns, tasks and comments.
//!
//! Every repository is [`TransactionScoped`]: its operations run against
//! the shared store unless the value was produced by
//! [`TransactionScoped::with_transaction`].

use super::{StorageResult, TransactionScoped};
use crate::domain::{
    Board, BoardId, BoardInput, Column, ColumnChanges, ColumnDemand, ColumnId, ColumnInput,
    Comment, CommentChanges, CommentDemand, CommentId, CommentInput, Task, TaskDemand, TaskId,
    TaskInput,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: TransactionScoped + Send + Sync {
    /// Inserts a board stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::RecordAlreadyExist`] when the assigned
    /// identifier collides, or a persistence error.
    async fn save(&self, input: &BoardInput, now: DateTime<Utc>) -> StorageResult<Board>;

    /// Loads a board.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the board does not
    /// exist.
    async fn find_one_by_id(&self, id: BoardId) -> StorageResult<Board>;

    /// Lists every board ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find(&self) -> StorageResult<Vec<Board>>;

    /// Replaces the board's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the board does not
    /// exist.
    async fn update(
        &self,
        id: BoardId,
        input: &BoardInput,
        now: DateTime<Utc>,
    ) -> StorageResult<Board>;

    /// Deletes a board together with its columns, tasks and comments.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the board does not
    /// exist.
    async fn delete(&self, id: BoardId) -> StorageResult<()>;
}

/// Column persistence contract.
#[async_trait]
pub trait ColumnRepository: TransactionScoped + Send + Sync {
    /// Inserts a column stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NameDuplicate`],
    /// [`super::StorageError::PositionDuplicate`] or
    /// [`super::StorageError::BoardRelation`] on constraint violations.
    async fn save(&self, input: &ColumnInput, now: DateTime<Utc>) -> StorageResult<Column>;

    /// Loads a column.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the column does not
    /// exist.
    async fn find_one_by_id(&self, id: ColumnId) -> StorageResult<Column>;

    /// Lists columns matching `demand`, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find(&self, demand: &ColumnDemand) -> StorageResult<Vec<Column>>;

    /// Replaces the column's name and position.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the column does not
    /// exist, or the duplicate variants on constraint violations.
    async fn update(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Column>;

    /// Deletes a column. Tasks still attached are removed by the storage
    /// cascade.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the column does not
    /// exist.
    async fn delete(&self, id: ColumnId) -> StorageResult<()>;

    /// Counts the columns on a board.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn count_by_board(&self, board: BoardId) -> StorageResult<u64>;

    /// Returns the column on the same board with the greatest position
    /// below `column`'s, if any.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find_left_neighbour(&self, column: &Column) -> StorageResult<Option<Column>>;

    /// Returns the column on the same board with the smallest position
    /// above `column`'s, if any.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find_right_neighbour(&self, column: &Column) -> StorageResult<Option<Column>>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: TransactionScoped + Send + Sync {
    /// Inserts a task stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::ColumnRelation`] or
    /// [`super::StorageError::PositionDuplicate`] on constraint violations.
    async fn save(&self, input: &TaskInput, now: DateTime<Utc>) -> StorageResult<Task>;

    /// Loads a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the task does not
    /// exist.
    async fn find_one_by_id(&self, id: TaskId) -> StorageResult<Task>;

    /// Lists tasks matching `demand`, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find(&self, demand: &TaskDemand) -> StorageResult<Vec<Task>>;

    /// Replaces every mutable field of the task, including its column.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the task does not
    /// exist, or the relation and duplicate variants on constraint
    /// violations.
    async fn update(&self, id: TaskId, input: &TaskInput, now: DateTime<Utc>)
    -> StorageResult<Task>;

    /// Deletes a task together with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> StorageResult<()>;

    /// Moves every task of column `from` into column `to`, returning the
    /// number of tasks moved.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::PositionDuplicate`] when a moved task
    /// collides with a task already in `to`, or
    /// [`super::StorageError::ColumnRelation`] when `to` does not exist.
    async fn move_to_column(
        &self,
        from: ColumnId,
        to: ColumnId,
        now: DateTime<Utc>,
    ) -> StorageResult<u64>;
}

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: TransactionScoped + Send + Sync {
    /// Inserts a comment stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::TaskRelation`] when the task does not
    /// exist.
    async fn save(&self, input: &CommentInput, now: DateTime<Utc>) -> StorageResult<Comment>;

    /// Loads a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the comment does not
    /// exist.
    async fn find_one_by_id(&self, id: CommentId) -> StorageResult<Comment>;

    /// Lists comments matching `demand`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    async fn find(&self, demand: &CommentDemand) -> StorageResult<Vec<Comment>>;

    /// Replaces the comment text.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the comment does not
    /// exist.
    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Comment>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::NotFound`] when the comment does not
    /// exist.
    async fn delete(&self, id: CommentId) -> StorageResult<()>;
}
