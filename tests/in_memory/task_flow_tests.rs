//! Cross-context flows for task creation and deletion.
//!
//! Creation of problem tasks must provision chat groups, and deletion must
//! cascade through submissions and groups before the task itself goes.

use crate::in_memory::helpers::{Stack, admin, runtime, stack};
use chrono::{Duration, Utc};
use comenius::group::{domain::Group, ports::GroupRepository};
use comenius::identity::domain::Actor;
use comenius::submission::{
    domain::EssayAnswer, ports::SubmissionRepository, services::SubmitAnswersRequest,
};
use comenius::task::{
    domain::{EssayQuestion, ProblemItem, TaskCategory},
    ports::TaskRepository,
    services::CreateTaskRequest,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that creating a problem task provisions one linked group per
/// sub-item.
#[rstest]
fn problem_task_creation_provisions_one_group_per_item(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let first = stack
        .register_member("Ada", "ada@school.test")
        .expect("register first member");
    let second = stack
        .register_member("Grace", "grace@school.test")
        .expect("register second member");

    let request = CreateTaskRequest::new(
        "Fractions",
        TaskCategory::Problem,
        Utc::now() + Duration::days(3),
    )
    .with_assignees([first.id(), second.id()])
    .with_problem_items([
        ProblemItem::new("Simplify 4/8"),
        ProblemItem::new("Compare 2/3 and 3/4"),
    ]);
    let task = rt
        .block_on(stack.workflow.create_task(&admin, request))
        .expect("create task");

    assert!(
        task.problem_items()
            .iter()
            .all(|item| item.group_id().is_some()),
        "every sub-item should carry its group link"
    );

    let provisioned = rt
        .block_on(stack.groups.find_by_task(task.id()))
        .expect("load groups");
    let names: Vec<&str> = provisioned.iter().map(Group::name).collect();
    assert_eq!(names, vec!["Fractions - Problem 1", "Fractions - Problem 2"]);
    for group in &provisioned {
        assert!(group.has_member(first.id()), "assignees join their groups");
        assert!(group.has_member(second.id()), "assignees join their groups");
        assert!(group.has_member(admin.id()), "the creator joins the groups");
    }
}

/// Tests that deleting an assessment removes its stored submissions.
#[rstest]
fn deleting_an_assessment_cascades_to_its_submissions(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let student = stack
        .register_member("Ada", "ada@school.test")
        .expect("register student");

    let question = EssayQuestion::new("Explain your reasoning");
    let question_id = question.id();
    let request = CreateTaskRequest::new(
        "Checkpoint",
        TaskCategory::Posttest,
        Utc::now() + Duration::days(7),
    )
    .with_assignees([student.id()])
    .with_essay_questions([question]);
    let task = rt
        .block_on(stack.workflow.create_task(&admin, request))
        .expect("create task");

    let answers = SubmitAnswersRequest::new(TaskCategory::Posttest)
        .with_essay_answers([EssayAnswer::new(question_id, "Halving both terms".to_owned())]);
    rt.block_on(stack.submission_flow.submit(&student, task.id(), answers))
        .expect("hand in answers");

    rt.block_on(stack.workflow.delete_task(&admin, task.id()))
        .expect("delete task");

    let leftovers = rt
        .block_on(stack.submissions.find_by_task(task.id()))
        .expect("list submissions");
    assert!(leftovers.is_empty(), "submissions should go with the task");
    let stored = rt
        .block_on(stack.tasks.find_by_id(task.id()))
        .expect("task lookup");
    assert!(stored.is_none(), "the task itself should be gone");
}

/// Tests that deleting a problem task removes its provisioned groups.
#[rstest]
fn deleting_a_problem_task_cascades_to_its_groups(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let request = CreateTaskRequest::new(
        "Geometry drills",
        TaskCategory::Problem,
        Utc::now() + Duration::days(3),
    )
    .with_problem_items([ProblemItem::new("Bisect an angle")]);
    let task = rt
        .block_on(stack.workflow.create_task(&admin, request))
        .expect("create task");

    let before = rt
        .block_on(stack.groups.find_by_task(task.id()))
        .expect("load groups");
    assert_eq!(before.len(), 1, "creation should provision the group");

    rt.block_on(stack.workflow.delete_task(&admin, task.id()))
        .expect("delete task");

    let after = rt
        .block_on(stack.groups.find_by_task(task.id()))
        .expect("load groups");
    assert!(after.is_empty(), "groups should go with the task");
}
