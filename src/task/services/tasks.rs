//! Service layer for task creation, lookup, partial update, and removal.

use crate::task::{
    domain::{NewTask, Task, TaskDescription, TaskDomainError, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Only fields that were supplied are changed; an empty string or `false`
/// counts as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    is_completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes no field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completion(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Validates every supplied field before anything is mutated.
    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            patch = patch.with_description(TaskDescription::new(description)?);
        }
        if let Some(is_completed) = self.is_completed {
            patch = patch.with_completion(is_completed);
        }
        Ok(patch)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store lookup fails.
    pub async fn list_all(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_newest_first().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store lookup fails.
    pub async fn get_by_id(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Creates an incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title or description is
    /// invalid, or [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            title: raw_title,
            description: raw_description,
        } = request;
        let title = TaskTitle::new(raw_title)?;
        let description = raw_description.map(TaskDescription::new).transpose()?;

        let new_task = NewTask::new(title, description, &*self.clock);
        let task = self.repository.insert(&new_task).await?;
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// `updated_at` is refreshed even when no supplied value differs from the
    /// stored one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when a supplied field is invalid,
    /// [`TaskServiceError::NotFound`] when the task does not exist, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let patch = request.into_patch()?;
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;

        if patch.is_empty() {
            tracing::debug!(task_id = %id, "empty patch, refreshing timestamp only");
        }
        task.apply(patch, &*self.clock);
        self.repository.update(&task).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskServiceError::NotFound(missing),
            TaskRepositoryError::Persistence(_) => TaskServiceError::Repository(err),
        })?;
        tracing::info!(task_id = %id, completed = task.is_completed(), "task updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// Returns `Ok(false)` when no such task exists, so deleting twice is a
    /// not-found signal rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<bool> {
        if self.repository.find_by_id(id).await?.is_none() {
            tracing::debug!(task_id = %id, "delete requested for missing task");
            return Ok(false);
        }
        let removed = self.repository.remove(id).await?;
        if removed {
            tracing::info!(task_id = %id, "task deleted");
        }
        Ok(removed)
    }

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store does not
    /// respond.
    pub async fn check_store(&self) -> TaskServiceResult<()> {
        Ok(self.repository.ping().await?)
    }
}
