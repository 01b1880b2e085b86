//! Assertion steps inspecting hand-in outcomes and stored submissions.

use comenius::submission::{
    domain::{EssayAnswer, Submission},
    ports::SubmissionRepository,
    services::SubmissionFlowError,
};
use comenius::task::domain::TaskCategory;
use eyre::WrapErr;
use rstest_bdd_macros::then;

use super::world::{SubmissionWorld, run_async};

fn stored_submission(world: &SubmissionWorld) -> Result<Submission, eyre::Report> {
    let task_id = world.scenario_task()?.id();
    run_async(
        world
            .submissions
            .find_by_task_and_user(task_id, world.student.id()),
    )
    .wrap_err("failed to load the stored submission")?
    .ok_or_else(|| eyre::eyre!("no submission stored for the scenario task"))
}

#[then("the hand-in is accepted without a score")]
fn hand_in_accepted(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(submission)) => {
            eyre::ensure!(
                submission.score().is_none(),
                "fresh hand-ins must start unscored"
            );
            let stored = stored_submission(world)?;
            eyre::ensure!(stored.score().is_none(), "stored hand-in carries a score");
            Ok(())
        }
        Some(Err(error)) => Err(eyre::eyre!("hand-in was rejected: {error}")),
        None => Err(eyre::eyre!("no hand-in was attempted")),
    }
}

#[then("the hand-in is rejected as already submitted")]
fn hand_in_duplicate(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(SubmissionFlowError::AlreadySubmitted { .. })) => Ok(()),
        Some(Err(error)) => Err(eyre::eyre!("unexpected rejection: {error}")),
        Some(Ok(_)) => Err(eyre::eyre!("duplicate hand-in was accepted")),
        None => Err(eyre::eyre!("no hand-in was attempted")),
    }
}

#[then(r#"the stored essay answer is still "{text}""#)]
fn stored_answer_unchanged(world: &SubmissionWorld, text: String) -> Result<(), eyre::Report> {
    let stored = stored_submission(world)?;
    let answers: Vec<&str> = stored.essay_answers().iter().map(EssayAnswer::text).collect();
    eyre::ensure!(
        answers == vec![text.as_str()],
        "stored essay answers changed: {answers:?}"
    );
    Ok(())
}

#[then("the submission total is {points:u32} points")]
fn submission_total(world: &SubmissionWorld, points: u32) -> Result<(), eyre::Report> {
    let stored = stored_submission(world)?;
    eyre::ensure!(
        stored.score() == Some(points),
        "expected a total of {points}, got {:?}",
        stored.score()
    );
    Ok(())
}

#[then("the hand-in is rejected as unsupported")]
fn hand_in_unsupported(world: &SubmissionWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(SubmissionFlowError::UnsupportedCategory(TaskCategory::Regular))) => Ok(()),
        Some(Err(error)) => Err(eyre::eyre!("unexpected rejection: {error}")),
        Some(Ok(_)) => Err(eyre::eyre!("regular-category hand-in was accepted")),
        None => Err(eyre::eyre!("no hand-in was attempted")),
    }
}
