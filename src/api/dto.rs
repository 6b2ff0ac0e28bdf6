//! JSON payloads exchanged over the task API.
//!
//! The same types are used by the server to serialise responses and by the
//! client to decode them, so the wire format lives in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{
    domain::{Task, TaskDescription},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

/// Task representation returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed task title.
    pub title: String,
    /// Optional description, `null` when never set.
    pub description: Option<String>,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task
                .description()
                .map(TaskDescription::as_str)
                .map(str::to_owned),
            is_completed: task.is_completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// Body of `POST /tasks`.
///
/// A missing title deserialises as an empty string so it is reported as a
/// validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDto {
    /// Requested title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTaskDto {
    /// Creates a body with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Adds a description to the body.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<CreateTaskDto> for CreateTaskRequest {
    fn from(dto: CreateTaskDto) -> Self {
        let request = Self::new(dto.title);
        match dto.description {
            Some(description) => request.with_description(description),
            None => request,
        }
    }
}

/// Body of `PATCH /tasks/{id}`.
///
/// Omitted and `null` fields are left untouched; empty strings and `false`
/// are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDto {
    /// Replacement title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl UpdateTaskDto {
    /// Patch that only changes the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the description.
    #[must_use]
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the completion flag.
    #[must_use]
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }
}

impl From<UpdateTaskDto> for UpdateTaskRequest {
    fn from(dto: UpdateTaskDto) -> Self {
        let mut request = Self::new();
        if let Some(title) = dto.title {
            request = request.with_title(title);
        }
        if let Some(description) = dto.description {
            request = request.with_description(description);
        }
        if let Some(is_completed) = dto.is_completed {
            request = request.with_completion(is_completed);
        }
        request
    }
}
