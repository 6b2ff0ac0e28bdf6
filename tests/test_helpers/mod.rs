//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::config::ServerConfig;
use taskboard::server::build_app;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository, services::TaskService,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Task API served on an ephemeral local port for the lifetime of the value.
pub struct TestServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Root URL of the running server, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Starts a server over a fresh in-memory store.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(Arc::new(InMemoryTaskRepository::new())).await
}

/// Starts a server over `repository` with the default CORS origins.
pub async fn spawn_server_with<R>(repository: Arc<R>) -> TestServer
where
    R: TaskRepository + 'static,
{
    let service = TaskService::new(repository, Arc::new(DefaultClock));
    let app = build_app(service, &ServerConfig::default().cors_origins)
        .expect("default CORS origins are valid");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let address = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("test server should run until aborted");
    });

    TestServer {
        base_url: format!("http://{address}"),
        handle,
    }
}
