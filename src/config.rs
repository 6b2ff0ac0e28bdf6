//! Environment-driven configuration for the server and the CLI client.
//!
//! Both loaders read a `.env` file first when one is present. Empty values
//! count as unset.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Configuration loading failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Address the listener binds to.
    pub host: String,
    /// Port the listener binds to.
    pub port: u16,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Whether an empty store is filled with sample tasks at startup.
    pub seed: bool,
    /// Frontend origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Default bind address.
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    /// Default port.
    pub const DEFAULT_PORT: u16 = 5209;
    /// Default connection pool size.
    pub const DEFAULT_POOL_SIZE: u32 = 5;
    /// Default CORS origins, matching the usual frontend dev servers.
    pub const DEFAULT_CORS_ORIGINS: [&'static str; 2] =
        ["http://localhost:5173", "http://localhost:3000"];

    /// Loads settings from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DATABASE_URL` | unset (in-memory store) |
    /// | `APP_HOST` | `0.0.0.0` |
    /// | `APP_PORT` | `5209` |
    /// | `DATABASE_POOL_SIZE` | `5` |
    /// | `TASKS_SEED` | `true` |
    /// | `CORS_ALLOWED_ORIGINS` | `http://localhost:5173,http://localhost:3000` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let pool_size = parse_or(
            "DATABASE_POOL_SIZE",
            read("DATABASE_POOL_SIZE"),
            Self::DEFAULT_POOL_SIZE,
        )?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_POOL_SIZE",
                message: "must be at least 1".to_owned(),
            });
        }

        let seed = match read("TASKS_SEED") {
            Some(raw) => parse_flag("TASKS_SEED", &raw)?,
            None => true,
        };

        let cors_origins = read("CORS_ALLOWED_ORIGINS").map_or_else(
            || Vec::from(Self::DEFAULT_CORS_ORIGINS.map(str::to_owned)),
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            },
        );

        Ok(Self {
            database_url: read("DATABASE_URL"),
            host: read("APP_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_owned()),
            port: parse_or("APP_PORT", read("APP_PORT"), Self::DEFAULT_PORT)?,
            pool_size,
            seed,
            cors_origins,
        })
    }

    /// `host:port` string for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: Self::DEFAULT_HOST.to_owned(),
            port: Self::DEFAULT_PORT,
            pool_size: Self::DEFAULT_POOL_SIZE,
            seed: true,
            cors_origins: Vec::from(Self::DEFAULT_CORS_ORIGINS.map(str::to_owned)),
        }
    }
}

/// Settings for the command-line client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the task API.
    pub api_url: String,
}

impl ClientConfig {
    /// Default API base URL.
    pub const DEFAULT_API_URL: &'static str = "http://localhost:5209";

    /// Loads `TASKS_API_URL` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup` instead of the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TASKS_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_owned());
        Self { api_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_owned(),
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::InvalidValue {
                key,
                message: format!("{value:?}: {err}"),
            })
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key,
            message: format!("{other:?} is not a boolean"),
        }),
    }
}
