//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the services.
//! Adapters in [`crate::adapters`] implement them.

pub mod backend;
pub mod error;
pub mod repository;
pub mod transaction;

pub use backend::{StorageBackend, StoragePorts};
pub use error::{StorageError, StorageResult};
pub use repository::{BoardRepository, ColumnRepository, CommentRepository, TaskRepository};
pub use transaction::{Transaction, TransactionCoordinator, TransactionScoped};
