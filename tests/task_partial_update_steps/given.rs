//! Given steps for partial update BDD scenarios.

use super::world::{PartialUpdateWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;

#[given("an empty task board")]
fn empty_task_board(world: &mut PartialUpdateWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_all()).wrap_err("list tasks")?;
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected an empty board, found {} tasks", tasks.len()));
    }
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut PartialUpdateWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create task for scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a task with description "{description}" titled "{title}" exists"#)]
fn described_task_exists(
    world: &mut PartialUpdateWorld,
    description: String,
    title: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title).with_description(description);
    let created =
        run_async(world.service.create(request)).wrap_err("create described task for setup")?;
    world.current_task = Some(created);
    Ok(())
}
