//! Column orchestration, including deletion with task reassignment.

use super::{ServiceError, ServiceResult, in_transaction};
use crate::domain::{Column, ColumnChanges, ColumnDemand, ColumnId, ColumnInput};
use crate::ports::{
    ColumnRepository, StorageBackend, StoragePorts, TaskRepository, TransactionScoped,
};
use crate::validation::Validator;
use mockable::Clock;
use std::sync::Arc;

/// Column service.
pub struct ColumnService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    storage: StoragePorts<S>,
    clock: Arc<C>,
    validator: Validator,
}

impl<S, C> ColumnService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Creates a column service.
    #[must_use]
    pub const fn new(storage: StoragePorts<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            validator: Validator::new(),
        }
    }

    /// Creates a column.
    ///
    /// Name and position uniqueness are left to storage.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for invalid input, or the
    /// name-duplicate, position-duplicate or board-relation storage errors.
    pub async fn create(&self, input: &ColumnInput) -> ServiceResult<Column> {
        self.validator.validate(input)?;
        let column = self
            .storage
            .columns
            .save(input, self.clock.utc())
            .await?;
        tracing::info!(column = %column.id(), board = %column.board(), "column created");
        Ok(column)
    }

    /// Loads a column.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn find_one_by_id(&self, id: ColumnId) -> ServiceResult<Column> {
        Ok(self.storage.columns.find_one_by_id(id).await?)
    }

    /// Lists columns matching `demand`, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the query fails.
    pub async fn find(&self, demand: &ColumnDemand) -> ServiceResult<Vec<Column>> {
        Ok(self.storage.columns.find(demand).await?)
    }

    /// Lists columns matching raw filter pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Filter`] before querying when a key is not
    /// allowed, or the storage error.
    pub async fn find_by_filters<I, K>(&self, filters: I) -> ServiceResult<Vec<Column>>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let demand = ColumnDemand::from_pairs(filters)?;
        self.find(&demand).await
    }

    /// Replaces the column's name and position.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for invalid input, or the
    /// storage error, including not-found and duplicates.
    pub async fn update(&self, id: ColumnId, changes: &ColumnChanges) -> ServiceResult<Column> {
        self.validator.validate(changes)?;
        let column = self
            .storage
            .columns
            .update(id, changes, self.clock.utc())
            .await?;
        tracing::debug!(column = %id, "column updated");
        Ok(column)
    }

    /// Deletes a column after moving its tasks to a neighbouring column.
    ///
    /// Tasks go to the nearest column on the left by position, or to the
    /// nearest on the right when the column is leftmost. The whole
    /// operation runs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LastColumn`] when the column is alone on its
    /// board, [`ServiceError::TargetColumnNotFound`] when no neighbour can
    /// be found, or the storage error of any step. Nothing changes on
    /// error.
    pub async fn delete(&self, id: ColumnId) -> ServiceResult<()> {
        let now = self.clock.utc();
        let columns = &self.storage.columns;
        let tasks = &self.storage.tasks;

        let (target, moved) = in_transaction(&*self.storage.coordinator, |transaction| async move {
            let scoped_columns = columns.with_transaction(&transaction);
            let scoped_tasks = tasks.with_transaction(&transaction);

            let column = scoped_columns.find_one_by_id(id).await?;
            if scoped_columns.count_by_board(column.board()).await? <= 1 {
                return Err(ServiceError::LastColumn);
            }
            let target = reassignment_target(&scoped_columns, &column).await?;
            let moved = scoped_tasks.move_to_column(id, target.id(), now).await?;
            scoped_columns.delete(id).await?;
            Ok((target.id(), moved))
        })
        .await?;

        tracing::info!(column = %id, target = %target, moved, "column deleted");
        Ok(())
    }
}

async fn reassignment_target<R: ColumnRepository>(
    columns: &R,
    column: &Column,
) -> ServiceResult<Column> {
    if let Some(left) = columns.find_left_neighbour(column).await? {
        return Ok(left);
    }
    columns
        .find_right_neighbour(column)
        .await?
        .ok_or(ServiceError::TargetColumnNotFound)
}
