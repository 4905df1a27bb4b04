//! Comment orchestration.

use super::ServiceResult;
use crate::domain::{Comment, CommentChanges, CommentDemand, CommentId, CommentInput};
use crate::ports::{CommentRepository, StorageBackend, StoragePorts};
use crate::validation::Validator;
use mockable::Clock;
use std::sync::Arc;

/// Comment service.
pub struct CommentService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    storage: StoragePorts<S>,
    clock: Arc<C>,
    validator: Validator,
}

impl<S, C> CommentService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Creates a comment service.
    #[must_use]
    pub const fn new(storage: StoragePorts<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            validator: Validator::new(),
        }
    }

    /// Creates a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input, or the
    /// task-relation storage error.
    pub async fn create(&self, input: &CommentInput) -> ServiceResult<Comment> {
        self.validator.validate(input)?;
        let comment = self.storage.comments.save(input, self.clock.utc()).await?;
        tracing::info!(comment = %comment.id(), task = %comment.task(), "comment created");
        Ok(comment)
    }

    /// Loads a comment.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn find_one_by_id(&self, id: CommentId) -> ServiceResult<Comment> {
        Ok(self.storage.comments.find_one_by_id(id).await?)
    }

    /// Lists comments matching `demand`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the query fails.
    pub async fn find(&self, demand: &CommentDemand) -> ServiceResult<Vec<Comment>> {
        Ok(self.storage.comments.find(demand).await?)
    }

    /// Lists comments matching raw filter pairs.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Filter`] before querying when a key is
    /// not allowed, or the storage error.
    pub async fn find_by_filters<I, K>(&self, filters: I) -> ServiceResult<Vec<Comment>>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let demand = CommentDemand::from_pairs(filters)?;
        self.find(&demand).await
    }

    /// Replaces the comment text.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input, or the
    /// storage error, including not-found.
    pub async fn update(&self, id: CommentId, changes: &CommentChanges) -> ServiceResult<Comment> {
        self.validator.validate(changes)?;
        let comment = self
            .storage
            .comments
            .update(id, changes, self.clock.utc())
            .await?;
        tracing::debug!(comment = %id, "comment updated");
        Ok(comment)
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn delete(&self, id: CommentId) -> ServiceResult<()> {
        self.storage.comments.delete(id).await?;
        tracing::info!(comment = %id, "comment deleted");
        Ok(())
    }
}
