//! In-memory column repository.

use super::store::{InMemoryStore, InMemoryTransaction, MemoryHandle};
use crate::domain::{BoardId, Column, ColumnChanges, ColumnDemand, ColumnId, ColumnInput};
use crate::ports::{ColumnRepository, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Column repository backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryColumnRepository {
    handle: MemoryHandle,
}

impl InMemoryColumnRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            handle: MemoryHandle::Store(store.clone()),
        }
    }
}

impl TransactionScoped for InMemoryColumnRepository {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            handle: MemoryHandle::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl ColumnRepository for InMemoryColumnRepository {
    async fn save(&self, input: &ColumnInput, now: DateTime<Utc>) -> StorageResult<Column> {
        self.handle
            .write(|tables| tables.insert_column(input, now))
            .await
            .map(Column::from_persisted)
    }

    async fn find_one_by_id(&self, id: ColumnId) -> StorageResult<Column> {
        self.handle
            .read(|tables| tables.column(id))
            .map(Column::from_persisted)
    }

    async fn find(&self, demand: &ColumnDemand) -> StorageResult<Vec<Column>> {
        let rows = self.handle.read(|tables| Ok(tables.columns(demand)))?;
        Ok(rows.into_iter().map(Column::from_persisted).collect())
    }

    async fn update(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Column> {
        self.handle
            .write(|tables| tables.update_column(id, changes, now))
            .await
            .map(Column::from_persisted)
    }

    async fn delete(&self, id: ColumnId) -> StorageResult<()> {
        self.handle.write(|tables| tables.delete_column(id)).await
    }

    async fn count_by_board(&self, board: BoardId) -> StorageResult<u64> {
        self.handle.read(|tables| Ok(tables.count_columns(board)))
    }

    async fn find_left_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        let row = self
            .handle
            .read(|tables| Ok(tables.left_neighbour(column.board(), column.position())))?;
        Ok(row.map(Column::from_persisted))
    }

    async fn find_right_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        let row = self
            .handle
            .read(|tables| Ok(tables.right_neighbour(column.board(), column.position())))?;
        Ok(row.map(Column::from_persisted))
    }
}
