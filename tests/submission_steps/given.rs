//! Background steps seeding assessment tasks and prior hand-ins.

use chrono::{Duration, Utc};
use comenius::task::{
    domain::{EssayQuestion, NewTaskData, Task, TaskCategory, TaskPriority},
    ports::TaskRepository,
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

use super::world::{SubmissionWorld, run_async};

#[given(r#"a posttest "{title}" with an essay question"#)]
fn seed_posttest(world: &mut SubmissionWorld, title: String) -> Result<(), eyre::Report> {
    let task = Task::new(
        NewTaskData {
            title,
            description: None,
            priority: TaskPriority::Medium,
            category: TaskCategory::Posttest,
            due_date: Utc::now() + Duration::days(7),
            checklist: Vec::new(),
            assignees: vec![world.student.id()],
            created_by: world.admin.id(),
            attachments: Vec::new(),
            essay_questions: vec![EssayQuestion::new("Explain your working")],
            choice_questions: Vec::new(),
            problem_items: Vec::new(),
        },
        &DefaultClock,
    )
    .wrap_err("failed to build the assessment task")?;

    run_async(world.tasks.store(&task)).wrap_err("failed to seed the assessment task")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the student has handed in the essay answer "{text}""#)]
fn prior_hand_in(world: &mut SubmissionWorld, text: String) -> Result<(), eyre::Report> {
    world
        .submit_essay(&text)?
        .wrap_err("scenario setup hand-in was rejected")?;
    Ok(())
}
