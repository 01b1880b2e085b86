//! Given steps for checklist progress BDD scenarios.

use super::world::{ChecklistWorld, run_async};
use chrono::{Duration, Utc};
use comenius::task::{
    domain::{ChecklistItem, TaskCategory, TaskStatus},
    services::CreateTaskRequest,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{title}" with {completed:usize} of {total:usize} checklist steps complete"#)]
fn task_with_checklist(
    world: &mut ChecklistWorld,
    title: String,
    completed: usize,
    total: usize,
) -> Result<(), eyre::Report> {
    let checklist: Vec<ChecklistItem> = (0..total)
        .map(|index| ChecklistItem::new(format!("step {index}"), index < completed))
        .collect();
    let due_date = Utc::now() + Duration::days(7);
    let request = CreateTaskRequest::new(title, TaskCategory::Regular, due_date)
        .with_checklist(checklist)
        .with_assignees([world.assignee.id()]);

    let created = run_async(world.service.create_task(&world.admin, request))
        .wrap_err("create task for checklist scenario")?;
    world.current_task = Some(created);
    Ok(())
}

#[given("the assignee has marked the task completed")]
fn task_already_completed(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;

    let updated = run_async(
        world
            .service
            .set_status(&world.assignee, task.id(), TaskStatus::Completed),
    )
    .wrap_err("complete task in scenario setup")?;

    world.current_task = Some(updated);
    Ok(())
}
