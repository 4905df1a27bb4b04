//! Board orchestration.

use super::{ServiceResult, in_transaction};
use crate::domain::{Board, BoardId, BoardInput, ColumnInput};
use crate::ports::{
    BoardRepository, ColumnRepository, StorageBackend, StoragePorts, TransactionScoped,
};
use crate::validation::Validator;
use mockable::Clock;
use std::sync::Arc;

/// Board service.
///
/// Every board is created together with its default column in one
/// transaction, so a board never exists without a column.
pub struct BoardService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    storage: StoragePorts<S>,
    clock: Arc<C>,
    validator: Validator,
}

impl<S, C> BoardService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Creates a board service.
    #[must_use]
    pub const fn new(storage: StoragePorts<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            validator: Validator::new(),
        }
    }

    /// Creates a board and its default column.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input, or the
    /// storage error of whichever write failed. Nothing is persisted on
    /// error.
    pub async fn create(&self, input: &BoardInput) -> ServiceResult<Board> {
        self.validator.validate(input)?;
        let now = self.clock.utc();
        let boards = &self.storage.boards;
        let columns = &self.storage.columns;

        let board = in_transaction(&*self.storage.coordinator, |transaction| async move {
            let board = boards
                .with_transaction(&transaction)
                .save(input, now)
                .await?;
            columns
                .with_transaction(&transaction)
                .save(&ColumnInput::default_for(board.id()), now)
                .await?;
            Ok(board)
        })
        .await?;

        tracing::info!(board = %board.id(), "board created with default column");
        Ok(board)
    }

    /// Loads a board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ports::StorageError::NotFound`] (wrapped) when the
    /// board does not exist.
    pub async fn find_one_by_id(&self, id: BoardId) -> ServiceResult<Board> {
        Ok(self.storage.boards.find_one_by_id(id).await?)
    }

    /// Lists every board ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the query fails.
    pub async fn find(&self) -> ServiceResult<Vec<Board>> {
        Ok(self.storage.boards.find().await?)
    }

    /// Replaces the board's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input or the
    /// storage error, including not-found.
    pub async fn update(&self, id: BoardId, input: &BoardInput) -> ServiceResult<Board> {
        self.validator.validate(input)?;
        let board = self
            .storage
            .boards
            .update(id, input, self.clock.utc())
            .await?;
        tracing::debug!(board = %id, "board updated");
        Ok(board)
    }

    /// Deletes a board together with its columns, tasks and comments.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn delete(&self, id: BoardId) -> ServiceResult<()> {
        self.storage.boards.delete(id).await?;
        tracing::info!(board = %id, "board deleted");
        Ok(())
    }
}
