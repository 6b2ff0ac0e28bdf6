//! Shared world state for partial update BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for partial update behaviour tests.
pub struct PartialUpdateWorld {
    pub service: TestTaskService,
    pub current_task: Option<Task>,
    pub last_update: Option<Result<Task, TaskServiceError>>,
    pub update_requests: usize,
}

impl PartialUpdateWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            current_task: None,
            last_update: None,
            update_requests: 0,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for PartialUpdateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PartialUpdateWorld {
    PartialUpdateWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
