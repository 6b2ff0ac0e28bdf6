//! Client-side mirror of the server's task list.
//!
//! [`TaskListState`] is owned by whoever composes the UI and handed to views
//! by reference. Every mutation goes through the server first; the returned
//! record then replaces the cached one.
//!
//! Concurrent edits to different fields of the same task race: each response
//! carries the whole record, so the last one to arrive wins.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::api::{ClientResult, TaskApi};
use super::ordering::display_order;
use crate::api::{CreateTaskDto, TaskDto, UpdateTaskDto};

/// Point-in-time copy of the client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListSnapshot {
    /// Cached tasks in server order, newest creations first.
    pub tasks: Vec<TaskDto>,
    /// Whether a refresh is in flight.
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next operation.
    pub error: Option<String>,
}

impl TaskListSnapshot {
    /// Tasks in display order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&TaskDto> {
        display_order(&self.tasks)
    }
}

#[derive(Debug, Default)]
struct Cache {
    tasks: Vec<TaskDto>,
    loading: bool,
    error: Option<String>,
    needs_naming: BTreeSet<i64>,
}

impl Cache {
    fn replace(&mut self, updated: TaskDto) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }
}

/// Task list state backed by a [`TaskApi`].
#[derive(Debug)]
pub struct TaskListState<A> {
    api: A,
    cache: Mutex<Cache>,
}

impl<A: TaskApi> TaskListState<A> {
    /// Creates an empty state over `api`. Call [`Self::refresh`] to load.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Transport this state talks to.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current tasks, loading flag, and error.
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        let cache = self.cache();
        TaskListSnapshot {
            tasks: cache.tasks.clone(),
            loading: cache.loading,
            error: cache.error.clone(),
        }
    }

    /// Whether `id` was created by [`Self::add_untitled`] and has not been
    /// renamed yet.
    #[must_use]
    pub fn needs_naming(&self, id: i64) -> bool {
        self.cache().needs_naming.contains(&id)
    }

    /// Reloads every task from the server.
    ///
    /// On failure the error message is recorded and the previously cached
    /// tasks are kept.
    pub async fn refresh(&self) {
        {
            let mut cache = self.cache();
            cache.loading = true;
            cache.error = None;
        }

        let result = self.api.list_tasks().await;

        let mut cache = self.cache();
        match result {
            Ok(tasks) => {
                let known: BTreeSet<i64> = tasks.iter().map(|task| task.id).collect();
                cache.needs_naming.retain(|id| known.contains(id));
                cache.tasks = tasks;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tasks");
                cache.error = Some(err.to_string());
            }
        }
        cache.loading = false;
    }

    /// Creates a task and puts it at the top of the cache.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn create(&self, body: CreateTaskDto) -> ClientResult<TaskDto> {
        self.clear_error();
        let created = self.record(self.api.create_task(body).await)?;
        self.cache().tasks.insert(0, created.clone());
        Ok(created)
    }

    /// Creates a placeholder task titled `Title N`, where N is one more than
    /// the number of cached tasks, and marks it as needing a name.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn add_untitled(&self) -> ClientResult<TaskDto> {
        let next = self.cache().tasks.len() + 1;
        let body = CreateTaskDto::titled(format!("Title {next}")).with_description("");
        let created = self.create(body).await?;
        self.cache().needs_naming.insert(created.id);
        Ok(created)
    }

    /// Deletes a task and drops it from the cache.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.clear_error();
        self.record(self.api.delete_task(id).await)?;
        let mut cache = self.cache();
        cache.tasks.retain(|task| task.id != id);
        cache.needs_naming.remove(&id);
        Ok(())
    }

    /// Saves a new title and clears the needs-naming mark.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn update_title(&self, id: i64, title: impl Into<String> + Send) -> ClientResult<()> {
        self.apply_patch(id, UpdateTaskDto::title(title)).await?;
        self.cache().needs_naming.remove(&id);
        Ok(())
    }

    /// Saves a new description.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn update_description(
        &self,
        id: i64,
        description: impl Into<String> + Send,
    ) -> ClientResult<()> {
        self.apply_patch(id, UpdateTaskDto::description(description))
            .await
    }

    /// Sets the completion flag.
    ///
    /// # Errors
    ///
    /// Returns the transport error after recording its message.
    pub async fn toggle_completion(&self, id: i64, is_completed: bool) -> ClientResult<()> {
        self.apply_patch(id, UpdateTaskDto::completion(is_completed))
            .await
    }

    async fn apply_patch(&self, id: i64, patch: UpdateTaskDto) -> ClientResult<()> {
        self.clear_error();
        let updated = self.record(self.api.update_task(id, patch).await)?;
        self.cache().replace(updated);
        Ok(())
    }

    fn clear_error(&self) {
        self.cache().error = None;
    }

    fn record<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "task request failed");
            self.cache().error = Some(err.to_string());
        }
        result
    }
}
