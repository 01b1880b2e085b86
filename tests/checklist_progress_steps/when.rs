//! When steps for checklist progress BDD scenarios.

use super::world::{ChecklistWorld, run_async};
use comenius::task::domain::{ChecklistItem, TaskStatus};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the assignee completes every checklist step")]
fn complete_every_step(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;

    let finished: Vec<ChecklistItem> = task
        .checklist()
        .iter()
        .map(|item| ChecklistItem::new(item.text(), true))
        .collect();
    let view = run_async(
        world
            .service
            .replace_checklist(&world.assignee, task.id(), finished),
    )
    .wrap_err("replace checklist with completed steps")?;

    world.current_task = Some(view.task);
    Ok(())
}

#[when("the assignee marks the task completed")]
fn mark_task_completed(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    set_status(world, TaskStatus::Completed)
}

#[when("the assignee moves the task back to in progress")]
fn move_back_to_in_progress(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    set_status(world, TaskStatus::InProgress)
}

fn set_status(world: &mut ChecklistWorld, status: TaskStatus) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;

    let updated = run_async(world.service.set_status(&world.assignee, task.id(), status))
        .wrap_err("set task status")?;

    world.current_task = Some(updated);
    Ok(())
}
