//! Application services for task tracking.

pub mod seed;
mod tasks;

pub use tasks::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
