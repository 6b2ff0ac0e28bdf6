//! Domain model for task tracking.
//!
//! A task is a titled, optionally described, completable unit of work with
//! creation and update timestamps. All infrastructure concerns stay outside
//! of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
