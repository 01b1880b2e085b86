//! Hand-in and marking flows across the task and submission contexts.

use crate::in_memory::helpers::{Stack, admin, runtime, stack};
use chrono::{Duration, Utc};
use comenius::identity::domain::Actor;
use comenius::submission::{
    domain::{EssayAnswer, EssayScore},
    ports::SubmissionRepository,
    services::SubmitAnswersRequest,
};
use comenius::task::{
    domain::{EssayQuestion, Task, TaskCategory},
    services::CreateTaskRequest,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn assessment_request(title: &str, category: TaskCategory, prompt: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title, category, Utc::now() + Duration::days(7))
        .with_essay_questions([EssayQuestion::new(prompt)])
}

fn first_question_answer(task: &Task, text: &str) -> SubmitAnswersRequest {
    let answers = task
        .essay_questions()
        .iter()
        .map(|question| EssayAnswer::new(question.id(), text.to_owned()));
    SubmitAnswersRequest::new(task.category()).with_essay_answers(answers)
}

/// Tests that a created assessment accepts a hand-in and later marking.
#[rstest]
fn hand_in_then_marking_updates_the_stored_total(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let student = stack
        .register_member("Ada", "ada@school.test")
        .expect("register student");

    let task = rt
        .block_on(stack.workflow.create_task(
            &admin,
            assessment_request("Checkpoint", TaskCategory::Posttest, "Show your working"),
        ))
        .expect("create task");

    let submission = rt
        .block_on(stack.submission_flow.submit(
            &student,
            task.id(),
            first_question_answer(&task, "Both shares are equal"),
        ))
        .expect("hand in answers");
    assert_eq!(submission.score(), None, "fresh hand-ins start unscored");

    let scores: Vec<EssayScore> = task
        .essay_questions()
        .iter()
        .map(|question| EssayScore {
            question_id: question.id(),
            score: 9,
        })
        .collect();
    let updated = rt
        .block_on(stack.submission_flow.score_essays(
            &admin,
            student.id(),
            TaskCategory::Posttest,
            &scores,
        ))
        .expect("score essays");
    assert_eq!(updated, 1, "exactly one submission should be marked");

    let stored = rt
        .block_on(stack.submissions.find_by_task_and_user(task.id(), student.id()))
        .expect("submission lookup")
        .expect("submission stored");
    assert_eq!(stored.score(), Some(9));
}

/// Tests that a user listing joins each submission with its task digest.
#[rstest]
fn user_listing_joins_each_submission_with_its_task(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let student = stack
        .register_member("Grace", "grace@school.test")
        .expect("register student");

    let pretest = rt
        .block_on(stack.workflow.create_task(
            &admin,
            assessment_request("Baseline", TaskCategory::Pretest, "Estimate the sum"),
        ))
        .expect("create pretest");
    let posttest = rt
        .block_on(stack.workflow.create_task(
            &admin,
            assessment_request("Checkpoint", TaskCategory::Posttest, "Show your working"),
        ))
        .expect("create posttest");

    rt.block_on(stack.submission_flow.submit(
        &student,
        pretest.id(),
        first_question_answer(&pretest, "About thirty"),
    ))
    .expect("hand in pretest");
    rt.block_on(stack.submission_flow.submit(
        &student,
        posttest.id(),
        first_question_answer(&posttest, "Thirty-two exactly"),
    ))
    .expect("hand in posttest");

    let rows = rt
        .block_on(stack.submission_flow.submissions_for_user(
            &student,
            student.id(),
            TaskCategory::Pretest,
        ))
        .expect("list pretest submissions");

    let joined: Vec<_> = rows
        .iter()
        .map(|row| (row.submission.task_id(), row.task.id))
        .collect();
    assert_eq!(
        joined,
        vec![(pretest.id(), pretest.id())],
        "only the pretest hand-in should surface, joined with its digest"
    );
}
