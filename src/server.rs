//! Server assembly and lifecycle.
//!
//! [`run`] picks the task store from configuration, seeds it when empty,
//! and serves the API until Ctrl+C.

use std::sync::Arc;

use axum::Router;
use axum::http::header::InvalidHeaderValue;
use mockable::{Clock, DefaultClock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::{cors_layer, create_router};
use crate::config::ServerConfig;
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskService, seed::seed_if_empty},
};

/// Failures that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The task store could not be opened, migrated, or seeded.
    #[error(transparent)]
    Store(#[from] TaskRepositoryError),
    /// A configured CORS origin is not a valid header value.
    #[error("invalid CORS origin: {0}")]
    Cors(#[from] InvalidHeaderValue),
    /// Binding or serving failed.
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Wraps the task router with CORS and request tracing.
///
/// # Errors
///
/// Returns [`ServerError::Cors`] when an origin is not a valid header value.
pub fn build_app<R, C>(
    service: TaskService<R, C>,
    cors_origins: &[String],
) -> Result<Router, ServerError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(create_router(service)
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Runs the server described by `config` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServerError`] when the store, the CORS policy, or the listener
/// cannot be set up, or when serving fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let clock = Arc::new(DefaultClock);
    match config.database_url.clone() {
        Some(url) => {
            let pool_size = config.pool_size;
            let repository = tokio::task::spawn_blocking(move || {
                PostgresTaskRepository::connect(&url, pool_size)
            })
            .await
            .map_err(TaskRepositoryError::persistence)??;
            repository.ensure_schema().await?;
            tracing::info!(pool_size, "using PostgreSQL task store");
            serve(Arc::new(repository), clock, &config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, tasks are kept in memory only");
            serve(Arc::new(InMemoryTaskRepository::new()), clock, &config).await
        }
    }
}

async fn serve<R>(
    repository: Arc<R>,
    clock: Arc<DefaultClock>,
    config: &ServerConfig,
) -> Result<(), ServerError>
where
    R: TaskRepository + 'static,
{
    if config.seed {
        let mut rng = StdRng::from_entropy();
        seed_if_empty(repository.as_ref(), &mut rng, clock.as_ref()).await?;
    }

    let service = TaskService::new(repository, clock);
    let app = build_app(service, &config.cors_origins)?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "task API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("task API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
