//! Task endpoint handlers.
//!
//! - `GET /tasks` lists every task, newest first
//! - `GET /tasks/{id}` returns one task
//! - `POST /tasks` creates a task
//! - `PATCH /tasks/{id}` applies a partial update
//! - `DELETE /tasks/{id}` removes a task

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;

use super::dto::{CreateTaskDto, TaskDto, UpdateTaskDto};
use super::error::ApiError;
use crate::task::{domain::TaskId, ports::TaskRepository, services::TaskService};

/// Parses a path segment into a task identifier.
///
/// # Errors
///
/// Returns an `INVALID_ID` error when the segment is not a positive integer
/// written as plain decimal digits.
pub fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    Some(raw)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<i64>().ok())
        .and_then(|value| TaskId::new(value).ok())
        .ok_or_else(|| ApiError::invalid_id(raw))
}

/// `GET /tasks`.
///
/// # Errors
///
/// Returns a 500 response when the store cannot be read.
pub async fn list_tasks<R, C>(
    State(service): State<TaskService<R, C>>,
) -> Result<Json<Vec<TaskDto>>, ApiError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let tasks = service.list_all().await?;
    Ok(Json(tasks.iter().map(TaskDto::from).collect()))
}

/// `GET /tasks/{id}`.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown task.
pub async fn get_task<R, C>(
    State(service): State<TaskService<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskDto>, ApiError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    service
        .get_by_id(id)
        .await?
        .map(|task| Json(TaskDto::from(task)))
        .ok_or_else(|| ApiError::not_found(id))
}

/// `POST /tasks`.
///
/// # Errors
///
/// Returns 400 for a malformed body or an invalid title or description.
pub async fn create_task<R, C>(
    State(service): State<TaskService<R, C>>,
    payload: Result<Json<CreateTaskDto>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Json(body) = payload?;
    let created = service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(TaskDto::from(created))))
}

/// `PATCH /tasks/{id}`.
///
/// # Errors
///
/// Returns 400 for a malformed id, body, or field value and 404 for an
/// unknown task.
pub async fn update_task<R, C>(
    State(service): State<TaskService<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskDto>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    let Json(body) = payload?;
    let updated = service.update(id, body.into()).await?;
    Ok(Json(TaskDto::from(updated)))
}

/// `DELETE /tasks/{id}`.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 for an unknown task.
pub async fn delete_task<R, C>(
    State(service): State<TaskService<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let id = parse_task_id(&raw_id)?;
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(id))
    }
}
