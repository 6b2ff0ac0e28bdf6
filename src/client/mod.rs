//! Client side of the task tracker.
//!
//! [`state::TaskListState`] mirrors the server's task list through a
//! [`api::TaskApi`] transport, [`ordering::display_order`] decides what is
//! shown first, and [`editor`] and [`render`] hold the presentation rules.

pub mod api;
pub mod editor;
pub mod http;
pub mod ordering;
pub mod render;
pub mod state;

pub use api::{ClientError, ClientResult, TaskApi};
pub use http::HttpTaskApi;
pub use ordering::display_order;
pub use state::{TaskListSnapshot, TaskListState};

#[cfg(test)]
mod tests;
