//! Task aggregate root and the values used to create and patch it.

use super::{TaskDescription, TaskId, TaskTitle};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Sub-second digits kept on task timestamps.
///
/// `PostgreSQL` `timestamptz` stores microseconds, so every store returns the
/// same instant that the domain produced.
const TIMESTAMP_PRECISION: u16 = 6;

/// Reads the clock at the precision persisted by task stores.
fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION)
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialises a freshly inserted task once the store has assigned its
    /// identifier.
    #[must_use]
    pub fn from_new(id: TaskId, new_task: &NewTask) -> Self {
        Self {
            id,
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            is_completed: new_task.is_completed,
            created_at: new_task.created_at,
            updated_at: new_task.updated_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            is_completed: data.is_completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies every field present in `patch` and refreshes `updated_at`.
    ///
    /// The timestamp moves forward even when the patch is empty or carries
    /// the values the task already holds.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        let TaskPatch {
            title,
            description,
            is_completed,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = Some(new_description);
        }
        if let Some(completed) = is_completed {
            self.is_completed = completed;
        }
        self.touch(clock);
    }

    /// Advances `updated_at` to the current clock time.
    ///
    /// `updated_at` strictly increases: a clock reading at or before the
    /// previous value advances it by one microsecond instead.
    fn touch(&mut self, clock: &impl Clock) {
        let current = now(clock);
        self.updated_at = if current > self.updated_at {
            current
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }
}

/// A task that has not been persisted yet and so has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<TaskDescription>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an incomplete task stamped with the current clock time.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: Option<TaskDescription>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = now(clock);
        Self {
            title,
            description,
            is_completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Creates a task with explicit history, as used when seeding a store.
    ///
    /// An `updated_at` earlier than `created_at` is raised to `created_at`.
    #[must_use]
    pub fn with_history(
        title: TaskTitle,
        description: Option<TaskDescription>,
        is_completed: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let created = created_at.trunc_subsecs(TIMESTAMP_PRECISION);
        let updated = updated_at.trunc_subsecs(TIMESTAMP_PRECISION).max(created);
        Self {
            title,
            description,
            is_completed,
            created_at: created,
            updated_at: updated,
        }
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the initial completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the initial mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated field-level changes for an existing task.
///
/// `None` means "leave the field as it is". Present values are applied even
/// when they are empty or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<TaskDescription>,
    is_completed: Option<bool>,
}

impl TaskPatch {
    /// Creates a patch that changes nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completion(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }
}
