//! Then steps for checklist progress BDD scenarios.

use super::world::{ChecklistWorld, run_async};
use comenius::task::domain::{ChecklistItem, Task, TaskStatus};
use eyre::WrapErr;
use rstest_bdd_macros::then;

/// Fetches the scenario task fresh from the repository.
fn stored_task(world: &ChecklistWorld) -> Result<Task, eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;

    let view = run_async(world.service.find_task(task.id())).wrap_err("fetch stored task")?;
    Ok(view.task)
}

#[then("the task progress is {percent:u8} percent")]
fn task_progress_is(world: &ChecklistWorld, percent: u8) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;

    if task.progress().percent() != percent {
        return Err(eyre::eyre!(
            "expected progress {percent}, found {}",
            task.progress().percent()
        ));
    }

    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ChecklistWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = stored_task(world)?;

    if task.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {expected_status}, found {}",
            task.status()
        ));
    }

    Ok(())
}

#[then("every checklist step is complete")]
fn every_step_complete(world: &ChecklistWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;

    if !task.checklist().iter().all(ChecklistItem::is_completed) {
        return Err(eyre::eyre!("expected every checklist step to be complete"));
    }

    Ok(())
}
