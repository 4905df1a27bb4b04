//! In-memory board repository.

use super::store::{InMemoryStore, InMemoryTransaction, MemoryHandle};
use crate::domain::{Board, BoardId, BoardInput};
use crate::ports::{BoardRepository, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Board repository backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryBoardRepository {
    handle: MemoryHandle,
}

impl InMemoryBoardRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            handle: MemoryHandle::Store(store.clone()),
        }
    }
}

impl TransactionScoped for InMemoryBoardRepository {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            handle: MemoryHandle::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn save(&self, input: &BoardInput, now: DateTime<Utc>) -> StorageResult<Board> {
        self.handle
            .write(|tables| Ok(tables.insert_board(input, now)))
            .await
            .map(Board::from_persisted)
    }

    async fn find_one_by_id(&self, id: BoardId) -> StorageResult<Board> {
        self.handle
            .read(|tables| tables.board(id))
            .map(Board::from_persisted)
    }

    async fn find(&self) -> StorageResult<Vec<Board>> {
        let rows = self.handle.read(|tables| Ok(tables.boards()))?;
        Ok(rows.into_iter().map(Board::from_persisted).collect())
    }

    async fn update(
        &self,
        id: BoardId,
        input: &BoardInput,
        now: DateTime<Utc>,
    ) -> StorageResult<Board> {
        self.handle
            .write(|tables| tables.update_board(id, input, now))
            .await
            .map(Board::from_persisted)
    }

    async fn delete(&self, id: BoardId) -> StorageResult<()> {
        self.handle.write(|tables| tables.delete_board(id)).await
    }
}
