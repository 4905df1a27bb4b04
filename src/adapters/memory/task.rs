//! In-memory task repository.

use super::store::{InMemoryStore, InMemoryTransaction, MemoryHandle};
use crate::domain::{ColumnId, Task, TaskDemand, TaskId, TaskInput};
use crate::ports::{StorageResult, TaskRepository, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Task repository backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    handle: MemoryHandle,
}

impl InMemoryTaskRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            handle: MemoryHandle::Store(store.clone()),
        }
    }
}

impl TransactionScoped for InMemoryTaskRepository {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            handle: MemoryHandle::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, input: &TaskInput, now: DateTime<Utc>) -> StorageResult<Task> {
        self.handle
            .write(|tables| tables.insert_task(input, now))
            .await
            .map(Task::from_persisted)
    }

    async fn find_one_by_id(&self, id: TaskId) -> StorageResult<Task> {
        self.handle
            .read(|tables| tables.task(id))
            .map(Task::from_persisted)
    }

    async fn find(&self, demand: &TaskDemand) -> StorageResult<Vec<Task>> {
        let rows = self.handle.read(|tables| Ok(tables.tasks(demand)))?;
        Ok(rows.into_iter().map(Task::from_persisted).collect())
    }

    async fn update(
        &self,
        id: TaskId,
        input: &TaskInput,
        now: DateTime<Utc>,
    ) -> StorageResult<Task> {
        self.handle
            .write(|tables| tables.update_task(id, input, now))
            .await
            .map(Task::from_persisted)
    }

    async fn delete(&self, id: TaskId) -> StorageResult<()> {
        self.handle.write(|tables| tables.delete_task(id)).await
    }

    async fn move_to_column(
        &self,
        from: ColumnId,
        to: ColumnId,
        now: DateTime<Utc>,
    ) -> StorageResult<u64> {
        self.handle
            .write(|tables| tables.move_tasks(from, to, now))
            .await
    }
}
