//! HTTP boundary for the task service.
//!
//! Handlers translate between JSON payloads in [`dto`] and the task service,
//! and map service failures onto status codes through [`error::ApiError`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod health;
pub mod routes;

pub use dto::{CreateTaskDto, TaskDto, UpdateTaskDto};
pub use error::{ApiError, ErrorBody, ErrorCode};
pub use health::{HealthCheck, HealthReport, HealthStatus};
pub use routes::{cors_layer, create_router};
