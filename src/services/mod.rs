//! Domain services orchestrating validation and persistence.
//!
//! Services validate input before touching storage, run multi-write
//! operations inside one transaction, and pass storage errors through
//! without reinterpreting them.

mod board;
mod column;
mod comment;
mod error;
mod task;
mod transaction;

pub use board::BoardService;
pub use column::ColumnService;
pub use comment::CommentService;
pub use error::{ErrorKind, ResponseClass, ServiceError, ServiceResult};
pub use task::TaskService;
pub use transaction::in_transaction;

use crate::ports::{StorageBackend, StoragePorts};
use mockable::Clock;
use std::sync::Arc;

/// The four entity services sharing one set of ports and one clock.
pub struct KanbanServices<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Board service.
    pub boards: BoardService<S, C>,
    /// Column service.
    pub columns: ColumnService<S, C>,
    /// Task service.
    pub tasks: TaskService<S, C>,
    /// Comment service.
    pub comments: CommentService<S, C>,
}

impl<S, C> KanbanServices<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Builds every service over `storage`.
    #[must_use]
    pub fn new(storage: &StoragePorts<S>, clock: &Arc<C>) -> Self {
        Self {
            boards: BoardService::new(storage.clone(), Arc::clone(clock)),
            columns: ColumnService::new(storage.clone(), Arc::clone(clock)),
            tasks: TaskService::new(storage.clone(), Arc::clone(clock)),
            comments: CommentService::new(storage.clone(), Arc::clone(clock)),
        }
    }
}
