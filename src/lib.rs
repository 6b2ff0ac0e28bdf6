//! Taskboard: a minimal task tracker.
//!
//! The crate provides a CRUD HTTP API over a single task table and a client
//! that mirrors the server's task list for display and editing.
//!
//! # Architecture
//!
//! The backend follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` stores
//!
//! # Modules
//!
//! - [`task`]: Task domain, storage, and service
//! - [`api`]: HTTP routes, payloads, and error mapping
//! - [`client`]: Client task state, transport, and display rules
//! - [`config`]: Environment-driven settings
//! - [`server`]: Server assembly and lifecycle
//! - [`telemetry`]: Tracing set-up

pub mod api;
pub mod client;
pub mod config;
pub mod server;
pub mod task;
pub mod telemetry;
