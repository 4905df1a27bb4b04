//! Storage backend family and the port bundle handed to services.

use super::{
    BoardRepository, ColumnRepository, CommentRepository, TaskRepository, Transaction,
    TransactionCoordinator,
};
use std::sync::Arc;

/// Ties a coordinator and the four repositories to one transaction type.
///
/// Implemented by zero-sized marker types in each adapter.
pub trait StorageBackend: Send + Sync + 'static {
    /// Transaction handle shared by the coordinator and repositories.
    type Transaction: Transaction;
    /// Transaction coordinator.
    type Coordinator: TransactionCoordinator<Transaction = Self::Transaction> + 'static;
    /// Board repository.
    type Boards: BoardRepository<Transaction = Self::Transaction> + 'static;
    /// Column repository.
    type Columns: ColumnRepository<Transaction = Self::Transaction> + 'static;
    /// Task repository.
    type Tasks: TaskRepository<Transaction = Self::Transaction> + 'static;
    /// Comment repository.
    type Comments: CommentRepository<Transaction = Self::Transaction> + 'static;
}

/// Shared handles to a backend's coordinator and repositories.
pub struct StoragePorts<S: StorageBackend> {
    /// Transaction coordinator.
    pub coordinator: Arc<S::Coordinator>,
    /// Board repository.
    pub boards: Arc<S::Boards>,
    /// Column repository.
    pub columns: Arc<S::Columns>,
    /// Task repository.
    pub tasks: Arc<S::Tasks>,
    /// Comment repository.
    pub comments: Arc<S::Comments>,
}

impl<S: StorageBackend> StoragePorts<S> {
    /// Bundles the given ports.
    #[must_use]
    pub fn new(
        coordinator: S::Coordinator,
        boards: S::Boards,
        columns: S::Columns,
        tasks: S::Tasks,
        comments: S::Comments,
    ) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            boards: Arc::new(boards),
            columns: Arc::new(columns),
            tasks: Arc::new(tasks),
            comments: Arc::new(comments),
        }
    }
}

impl<S: StorageBackend> Clone for StoragePorts<S> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
            boards: Arc::clone(&self.boards),
            columns: Arc::clone(&self.columns),
            tasks: Arc::clone(&self.tasks),
            comments: Arc::clone(&self.comments),
        }
    }
}
