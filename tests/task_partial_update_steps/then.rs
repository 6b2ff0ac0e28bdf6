//! Then steps for partial update BDD scenarios.

use super::world::{PartialUpdateWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::task::services::TaskServiceError;

#[then("the task is not completed")]
fn task_not_completed(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    if world.task()?.is_completed() {
        return Err(eyre::eyre!("expected an incomplete task"));
    }
    Ok(())
}

#[then("the task is completed")]
fn task_completed(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    if !world.task()?.is_completed() {
        return Err(eyre::eyre!("expected a completed task"));
    }
    Ok(())
}

#[then("the task has no description")]
fn task_has_no_description(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    if let Some(description) = world.task()?.description() {
        return Err(eyre::eyre!(
            "expected no description, found {:?}",
            description.as_str()
        ));
    }
    Ok(())
}

#[then("the task description is empty")]
fn task_description_is_empty(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    match world.task()?.description() {
        Some(description) if description.as_str().is_empty() => Ok(()),
        other => Err(eyre::eyre!(
            "expected an empty description, found {:?}",
            other.map(|value| value.as_str())
        )),
    }
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &PartialUpdateWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let stored = run_async(world.service.get_by_id(id))
        .wrap_err("reload task")?
        .ok_or_else(|| eyre::eyre!("task {id} disappeared"))?;
    if stored.title().as_str() != title {
        return Err(eyre::eyre!(
            "expected title {title:?}, found {:?}",
            stored.title().as_str()
        ));
    }
    Ok(())
}

#[then("no update request is sent")]
fn no_update_request(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    if world.update_requests != 0 {
        return Err(eyre::eyre!(
            "expected no update request, found {}",
            world.update_requests
        ));
    }
    Ok(())
}

#[then("the update is rejected as invalid")]
fn update_rejected(world: &PartialUpdateWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    if !matches!(result, Err(TaskServiceError::Domain(_))) {
        return Err(eyre::eyre!("expected a validation error, got {result:?}"));
    }
    Ok(())
}
