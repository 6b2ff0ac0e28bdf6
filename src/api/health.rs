//! Health endpoint reporting task store reachability.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::task::{ports::TaskRepository, services::TaskService};

/// Name of the single health check.
pub const TASK_STORE_CHECK: &str = "task_store";

/// Overall or per-check health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Everything responded.
    Healthy,
    /// At least one dependency failed.
    Unhealthy,
}

/// Result of one dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Check name.
    pub name: String,
    /// Check outcome.
    pub status: HealthStatus,
    /// Human-readable outcome.
    pub description: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Aggregate outcome.
    pub status: HealthStatus,
    /// Individual checks.
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    fn from_checks(checks: Vec<HealthCheck>) -> Self {
        let status = if checks
            .iter()
            .all(|check| check.status == HealthStatus::Healthy)
        {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        Self { status, checks }
    }

    const fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// `GET /health`: 200 when the store answers, 503 otherwise.
pub async fn health_check<R, C>(
    State(service): State<TaskService<R, C>>,
) -> (StatusCode, Json<HealthReport>)
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let store_check = match service.check_store().await {
        Ok(()) => HealthCheck {
            name: TASK_STORE_CHECK.to_owned(),
            status: HealthStatus::Healthy,
            description: "task store is reachable".to_owned(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "task store health check failed");
            HealthCheck {
                name: TASK_STORE_CHECK.to_owned(),
                status: HealthStatus::Unhealthy,
                description: "task store is unreachable".to_owned(),
            }
        }
    };

    let report = HealthReport::from_checks(vec![store_check]);
    (report.status_code(), Json(report))
}
