//! When steps for partial update BDD scenarios.

use super::world::{PartialUpdateWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::api::TaskDto;
use taskboard::client::editor::InlineEditor;
use taskboard::task::services::{CreateTaskRequest, UpdateTaskRequest};

fn patch(world: &mut PartialUpdateWorld, request: UpdateTaskRequest) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    world.update_requests += 1;
    let result = run_async(world.service.update(id, request));
    if let Ok(updated) = &result {
        world.current_task = Some(updated.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut PartialUpdateWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create task")?;
    world.current_task = Some(created);
    Ok(())
}

#[when("the task is marked as completed")]
fn mark_completed(world: &mut PartialUpdateWorld) -> Result<(), eyre::Report> {
    patch(world, UpdateTaskRequest::new().with_completion(true))
}

#[when("the title is patched to an empty string")]
fn patch_empty_title(world: &mut PartialUpdateWorld) -> Result<(), eyre::Report> {
    patch(world, UpdateTaskRequest::new().with_title(""))
}

#[when("the description is patched to an empty string")]
fn patch_empty_description(world: &mut PartialUpdateWorld) -> Result<(), eyre::Report> {
    patch(world, UpdateTaskRequest::new().with_description(""))
}

#[when("the title editor saves the current title padded with spaces")]
fn save_padded_title(world: &mut PartialUpdateWorld) -> Result<(), eyre::Report> {
    let view = TaskDto::from(world.task()?);
    let mut editor = InlineEditor::title(&view, false);
    if !editor.begin() {
        return Err(eyre::eyre!("title editor should be editable"));
    }
    editor.input(&format!("  {}  ", view.title));
    match editor.commit() {
        Some(title) => patch(world, UpdateTaskRequest::new().with_title(title)),
        None => Ok(()),
    }
}
