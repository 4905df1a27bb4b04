//! In-memory comment repository.

use super::store::{InMemoryStore, InMemoryTransaction, MemoryHandle};
use crate::domain::{Comment, CommentChanges, CommentDemand, CommentId, CommentInput};
use crate::ports::{CommentRepository, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Comment repository backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    handle: MemoryHandle,
}

impl InMemoryCommentRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: &InMemoryStore) -> Self {
        Self {
            handle: MemoryHandle::Store(store.clone()),
        }
    }
}

impl TransactionScoped for InMemoryCommentRepository {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            handle: MemoryHandle::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn save(&self, input: &CommentInput, now: DateTime<Utc>) -> StorageResult<Comment> {
        self.handle
            .write(|tables| tables.insert_comment(input, now))
            .await
            .map(Comment::from_persisted)
    }

    async fn find_one_by_id(&self, id: CommentId) -> StorageResult<Comment> {
        self.handle
            .read(|tables| tables.comment(id))
            .map(Comment::from_persisted)
    }

    async fn find(&self, demand: &CommentDemand) -> StorageResult<Vec<Comment>> {
        let rows = self.handle.read(|tables| Ok(tables.comments(demand)))?;
        Ok(rows.into_iter().map(Comment::from_persisted).collect())
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Comment> {
        self.handle
            .write(|tables| tables.update_comment(id, changes, now))
            .await
            .map(Comment::from_persisted)
    }

    async fn delete(&self, id: CommentId) -> StorageResult<()> {
        self.handle.write(|tables| tables.delete_comment(id)).await
    }
}
