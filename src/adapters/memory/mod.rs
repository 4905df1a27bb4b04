//! In-memory storage backend.
//!
//! Emulates the persisted layout's foreign keys, unique indexes and delete
//! cascades, and supports snapshot transactions. Intended for tests and
//! local experimentation.

mod board;
mod column;
mod comment;
mod store;
mod tables;
mod task;

pub use board::InMemoryBoardRepository;
pub use column::InMemoryColumnRepository;
pub use comment::InMemoryCommentRepository;
pub use store::{InMemoryStore, InMemoryTransaction};
pub use task::InMemoryTaskRepository;

use crate::ports::{StorageBackend, StoragePorts};

/// Storage family for the in-memory backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryBackend;

impl StorageBackend for InMemoryBackend {
    type Transaction = InMemoryTransaction;
    type Coordinator = InMemoryStore;
    type Boards = InMemoryBoardRepository;
    type Columns = InMemoryColumnRepository;
    type Tasks = InMemoryTaskRepository;
    type Comments = InMemoryCommentRepository;
}

impl InMemoryStore {
    /// Returns ports backed by this store.
    #[must_use]
    pub fn ports(&self) -> StoragePorts<InMemoryBackend> {
        StoragePorts::new(
            self.clone(),
            InMemoryBoardRepository::new(self),
            InMemoryColumnRepository::new(self),
            InMemoryTaskRepository::new(self),
            InMemoryCommentRepository::new(self),
        )
    }
}
