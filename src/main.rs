//! Task API server.
//!
//! Configuration comes from the environment; see
//! [`taskboard::config::ServerConfig::from_env`].

use taskboard::{config::ServerConfig, server, telemetry};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init();
    let config = ServerConfig::from_env()?;
    tracing::info!(
        address = %config.bind_address(),
        seed = config.seed,
        persistent = config.database_url.is_some(),
        "starting task API"
    );
    server::run(config).await.map_err(Into::into)
}
