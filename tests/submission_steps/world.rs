//! Shared world state for assessment hand-in BDD scenarios.

use std::sync::Arc;

use comenius::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, UserId},
};
use comenius::submission::{
    adapters::memory::InMemorySubmissionRepository,
    domain::{EssayAnswer, Submission},
    services::{SubmissionFlowResult, SubmissionService, SubmitAnswersRequest},
};
use comenius::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{EssayQuestion, QuestionId, Task},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestSubmissionService = SubmissionService<
    InMemorySubmissionRepository,
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for assessment hand-in behaviour tests.
pub struct SubmissionWorld {
    /// The submission service under test.
    pub service: TestSubmissionService,
    /// Direct handle on the submission store for assertions.
    pub submissions: Arc<InMemorySubmissionRepository>,
    /// Direct handle on the task store for seeding.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Administrator who marks essays.
    pub admin: Actor,
    /// Student who hands answers in.
    pub student: Actor,
    /// Assessment task the scenario operates on.
    pub task: Option<Task>,
    /// Result of the most recent hand-in attempt.
    pub last_result: Option<SubmissionFlowResult<Submission>>,
}

impl SubmissionWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let service = SubmissionService::new(
            Arc::clone(&submissions),
            Arc::clone(&tasks),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            submissions,
            tasks,
            admin: Actor::admin(UserId::new()),
            student: Actor::member(UserId::new()),
            task: None,
            last_result: None,
        }
    }

    /// Returns the scenario task seeded by the background step.
    pub fn scenario_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing assessment task in scenario world"))
    }

    /// Returns the seeded task's single essay question.
    pub fn essay_question_id(&self) -> Result<QuestionId, eyre::Report> {
        self.scenario_task()?
            .essay_questions()
            .iter()
            .map(EssayQuestion::id)
            .next()
            .ok_or_else(|| eyre::eyre!("scenario task has no essay question"))
    }

    /// Hands in one essay answer as the student.
    pub fn submit_essay(
        &self,
        text: &str,
    ) -> Result<SubmissionFlowResult<Submission>, eyre::Report> {
        let task = self.scenario_task()?;
        let request = SubmitAnswersRequest::new(task.category()).with_essay_answers([
            EssayAnswer::new(self.essay_question_id()?, text.to_owned()),
        ]);
        Ok(run_async(
            self.service.submit(&self.student, task.id(), request),
        ))
    }
}

impl Default for SubmissionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SubmissionWorld {
    SubmissionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
