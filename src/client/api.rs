//! Transport port used by the client task state.

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{CreateTaskDto, TaskDto, UpdateTaskDto};

/// Errors surfaced by a [`TaskApi`] implementation.
///
/// The display text of the status variants is what the client state records
/// as its error message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 404.
    #[error("HTTP error! status: 404")]
    NotFound,
    /// The server answered with another non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for client transport operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Remote task operations as seen by the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches every task in server order.
    async fn list_tasks(&self) -> ClientResult<Vec<TaskDto>>;

    /// Fetches one task.
    async fn get_task(&self, id: i64) -> ClientResult<TaskDto>;

    /// Creates a task and returns the stored record.
    async fn create_task(&self, body: CreateTaskDto) -> ClientResult<TaskDto>;

    /// Applies a partial update and returns the stored record.
    async fn update_task(&self, id: i64, patch: UpdateTaskDto) -> ClientResult<TaskDto>;

    /// Deletes a task.
    async fn delete_task(&self, id: i64) -> ClientResult<()>;
}
