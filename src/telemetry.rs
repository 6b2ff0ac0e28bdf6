//! Tracing subscriber set-up.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Server filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,taskboard=debug";

/// CLI filter used when `RUST_LOG` is unset or invalid.
pub const CLI_FILTER: &str = "warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global fmt subscriber for the server, filtered by `RUST_LOG`.
///
/// Calling this more than once leaves the first subscriber in place.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(filter_or(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Installs a quieter subscriber that writes to stderr, leaving stdout to
/// command output.
pub fn init_for_cli() {
    let installed = tracing_subscriber::registry()
        .with(filter_or(CLI_FILTER))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
