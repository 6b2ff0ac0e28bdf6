//! Sample data for empty task stores.

use crate::task::{
    domain::{NewTask, TaskDescription, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use chrono::TimeDelta;
use mockable::Clock;
use rand::Rng;
use rand::seq::SliceRandom;

/// Number of tasks written into an empty store.
pub const SEED_TASK_COUNT: usize = 10;

const TITLES: &[&str] = &[
    "Complete project documentation",
    "Review pull requests",
    "Setup development environment",
    "Write unit tests",
    "Update dependencies",
    "Fix critical bugs",
    "Optimize database queries",
    "Implement new feature",
    "Code review for team member",
    "Deploy to production",
    "Create API documentation",
    "Refactor legacy code",
    "Setup CI/CD pipeline",
    "Security audit",
    "Performance testing",
    "User acceptance testing",
    "Database migration",
    "Backup verification",
    "Monitor system logs",
    "Update deployment scripts",
];

const DESCRIPTIONS: &[&str] = &[
    "Document the new endpoints with request and response examples",
    "Go through all pending PRs and leave actionable feedback",
    "Install the toolchain and editor plugins for new team members",
    "Cover the new functionality with focused unit tests",
    "Bump dependencies to their latest stable versions and rerun the suite",
    "Investigate the crash reports filed against the latest release",
    "Profile the slowest queries and add the missing indexes",
    "Ship the first iteration behind a configuration switch",
    "Pair on the first contribution from the newest team member",
    "Roll out the release with a rollback plan prepared",
    "List every error response the API can return",
    "Replace the hand-written session handling with the shared module",
    "Run tests and publish artefacts on every merge",
    "Check dependencies and configuration for known vulnerabilities",
    "Measure response times under the expected peak load",
    "Walk stakeholders through the new flows and collect sign-off",
    "Apply the pending schema changes in staging first",
    "Restore last night's backup into a scratch database",
    "Look for recurring warnings in the production logs",
    "Add the new environment variables to the deployment scripts",
];

/// Inserts [`SEED_TASK_COUNT`] sample tasks when the store is empty.
///
/// Each task gets a random title and description, a 50% chance of being
/// completed, and a creation time up to 29 days in the past. Completed tasks
/// carry an update time one to nine days after creation, capped at the
/// current time. Returns the number of tasks written, which is zero when the
/// store already holds tasks.
///
/// # Errors
///
/// Returns [`TaskRepositoryError`] when counting or inserting fails.
pub async fn seed_if_empty<R, G>(
    repository: &R,
    rng: &mut G,
    clock: &impl Clock,
) -> TaskRepositoryResult<usize>
where
    R: TaskRepository + ?Sized,
    G: Rng + Send,
{
    if repository.count().await? > 0 {
        tracing::info!("task store already contains tasks, skipping seeding");
        return Ok(0);
    }

    let now = clock.utc();
    let mut seeded = Vec::with_capacity(SEED_TASK_COUNT);
    for _ in 0..SEED_TASK_COUNT {
        seeded.push(sample_task(rng, now)?);
    }

    for task in &seeded {
        repository.insert(task).await?;
    }
    tracing::info!(count = seeded.len(), "seeded task store with sample tasks");
    Ok(seeded.len())
}

fn sample_task<G: Rng>(
    rng: &mut G,
    now: chrono::DateTime<chrono::Utc>,
) -> TaskRepositoryResult<NewTask> {
    let title = TaskTitle::new(pick(TITLES, rng)).map_err(TaskRepositoryError::persistence)?;
    let description =
        TaskDescription::new(pick(DESCRIPTIONS, rng)).map_err(TaskRepositoryError::persistence)?;
    let is_completed = rng.gen_range(0..2) == 1;

    let created_at = now - TimeDelta::days(rng.gen_range(0..30));
    let updated_at = if is_completed {
        (created_at + TimeDelta::days(rng.gen_range(1..10))).min(now)
    } else {
        created_at
    };

    Ok(NewTask::with_history(
        title,
        Some(description),
        is_completed,
        created_at,
        updated_at,
    ))
}

fn pick<G: Rng>(catalogue: &[&'static str], rng: &mut G) -> &'static str {
    catalogue.choose(rng).copied().unwrap_or("Untitled task")
}
