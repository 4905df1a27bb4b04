//! Task orchestration.

use super::ServiceResult;
use crate::domain::{Task, TaskDemand, TaskId, TaskInput};
use crate::ports::{StorageBackend, StoragePorts, TaskRepository};
use crate::validation::Validator;
use mockable::Clock;
use std::sync::Arc;

/// Task service.
pub struct TaskService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    storage: StoragePorts<S>,
    clock: Arc<C>,
    validator: Validator,
}

impl<S, C> TaskService<S, C>
where
    S: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Creates a task service.
    #[must_use]
    pub const fn new(storage: StoragePorts<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            validator: Validator::new(),
        }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input, or the
    /// column-relation and position-duplicate storage errors.
    pub async fn create(&self, input: &TaskInput) -> ServiceResult<Task> {
        self.validator.validate(input)?;
        let task = self.storage.tasks.save(input, self.clock.utc()).await?;
        tracing::info!(task = %task.id(), column = %task.column(), "task created");
        Ok(task)
    }

    /// Loads a task.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn find_one_by_id(&self, id: TaskId) -> ServiceResult<Task> {
        Ok(self.storage.tasks.find_one_by_id(id).await?)
    }

    /// Lists tasks matching `demand`, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the query fails.
    pub async fn find(&self, demand: &TaskDemand) -> ServiceResult<Vec<Task>> {
        Ok(self.storage.tasks.find(demand).await?)
    }

    /// Lists tasks matching raw filter pairs.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Filter`] before querying when a key is
    /// not allowed, or the storage error.
    pub async fn find_by_filters<I, K>(&self, filters: I) -> ServiceResult<Vec<Task>>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let demand = TaskDemand::from_pairs(filters)?;
        self.find(&demand).await
    }

    /// Replaces every mutable field of the task, possibly moving it to
    /// another column.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceError::Validation`] for invalid input, or the
    /// storage error, including not-found.
    pub async fn update(&self, id: TaskId, input: &TaskInput) -> ServiceResult<Task> {
        self.validator.validate(input)?;
        let task = self
            .storage
            .tasks
            .update(id, input, self.clock.utc())
            .await?;
        tracing::debug!(task = %id, "task updated");
        Ok(task)
    }

    /// Deletes a task and its comments.
    ///
    /// # Errors
    ///
    /// Returns the storage error, including not-found.
    pub async fn delete(&self, id: TaskId) -> ServiceResult<()> {
        self.storage.tasks.delete(id).await?;
        tracing::info!(task = %id, "task deleted");
        Ok(())
    }
}
