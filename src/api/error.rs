//! Error responses for the task API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};

/// Machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field failed validation.
    ValidationError,
    /// The path identifier is not a positive integer.
    InvalidId,
    /// The request body is not valid JSON for the endpoint.
    InvalidBody,
    /// No task exists with the requested identifier.
    TaskNotFound,
    /// The server failed to complete the request.
    InternalError,
}

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error category.
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
}

/// An error response with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    const INTERNAL_MESSAGE: &'static str = "An unexpected error occurred";

    fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    /// 400 for a field that failed validation.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationError, message)
    }

    /// 400 for a path identifier that is not a positive integer.
    #[must_use]
    pub fn invalid_id(raw: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidId,
            format!("invalid task id: {raw}"),
        )
    }

    /// 404 for an unknown task.
    #[must_use]
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorCode::TaskNotFound,
            format!("task not found: {id}"),
        )
    }

    /// 500 with an opaque message. The cause is logged, never returned.
    #[must_use]
    pub fn internal(cause: &dyn std::error::Error) -> Self {
        tracing::error!(error = %cause, "request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError,
            Self::INTERNAL_MESSAGE,
        )
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => Self::validation(domain.to_string()),
            TaskServiceError::NotFound(id)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(id)) => {
                Self::not_found(id)
            }
            TaskServiceError::Repository(repository @ TaskRepositoryError::Persistence(_)) => {
                Self::internal(&repository)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidBody,
            rejection.body_text(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
