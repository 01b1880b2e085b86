//! Action steps driving hand-ins and essay marking.

use comenius::submission::{domain::EssayScore, services::SubmitAnswersRequest};
use comenius::task::domain::TaskCategory;
use eyre::WrapErr;
use rstest_bdd_macros::when;

use super::world::{SubmissionWorld, run_async};

#[when(r#"the student hands in the essay answer "{text}""#)]
fn hand_in(world: &mut SubmissionWorld, text: String) -> Result<(), eyre::Report> {
    let outcome = world.submit_essay(&text)?;
    world.last_result = Some(outcome);
    Ok(())
}

#[when("the administrator scores the essay at {points:u32} points")]
fn score_essay(world: &mut SubmissionWorld, points: u32) -> Result<(), eyre::Report> {
    let question_id = world.essay_question_id()?;
    let category = world.scenario_task()?.category();
    let updated = run_async(world.service.score_essays(
        &world.admin,
        world.student.id(),
        category,
        &[EssayScore {
            question_id,
            score: points,
        }],
    ))
    .wrap_err("essay scoring was rejected")?;
    eyre::ensure!(updated == 1, "expected exactly one scored submission, got {updated}");
    Ok(())
}

#[when("the student declares a hand-in for a regular task")]
fn declare_regular_hand_in(world: &mut SubmissionWorld) -> Result<(), eyre::Report> {
    let task_id = world.scenario_task()?.id();
    let request = SubmitAnswersRequest::new(TaskCategory::Regular);
    let outcome = run_async(world.service.submit(&world.student, task_id, request));
    world.last_result = Some(outcome);
    Ok(())
}
