//! Router assembly for the task API.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /tasks | `list_tasks` |
//! | POST | /tasks | `create_task` |
//! | GET | /tasks/{id} | `get_task` |
//! | PATCH | /tasks/{id} | `update_task` |
//! | DELETE | /tasks/{id} | `delete_task` |
//! | GET | /health | `health_check` |

use axum::Router;
use axum::http::header::{CONTENT_TYPE, InvalidHeaderValue};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use mockable::Clock;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers::{create_task, delete_task, get_task, list_tasks, update_task};
use super::health::health_check;
use crate::task::{ports::TaskRepository, services::TaskService};

/// Builds the task API router over `service`.
pub fn create_router<R, C>(service: TaskService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            get(list_tasks::<R, C>).post(create_task::<R, C>),
        )
        .route(
            "/tasks/{id}",
            get(get_task::<R, C>)
                .patch(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .route("/health", get(health_check::<R, C>))
        .with_state(service)
}

/// CORS policy admitting the configured frontend origins.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] when an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let allowed = origins
        .iter()
        .map(String::as_str)
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}
