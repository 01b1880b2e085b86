//! Shared world state for checklist progress BDD scenarios.

use std::sync::Arc;

use comenius::group::adapters::memory::InMemoryGroupRepository;
use comenius::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, UserId},
};
use comenius::submission::adapters::memory::InMemorySubmissionRepository;
use comenius::task::{
    adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskWorkflowService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryGroupRepository,
    InMemorySubmissionRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for checklist progress behaviour tests.
pub struct ChecklistWorld {
    /// The workflow service under test.
    pub service: TestWorkflowService,
    /// Administrator who creates the scenario task.
    pub admin: Actor,
    /// Assignee who works through the checklist.
    pub assignee: Actor,
    /// Task the scenario operates on.
    pub current_task: Option<Task>,
}

impl ChecklistWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskWorkflowService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(InMemorySubmissionRepository::new()),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            admin: Actor::admin(UserId::new()),
            assignee: Actor::member(UserId::new()),
            current_task: None,
        }
    }
}

impl Default for ChecklistWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ChecklistWorld {
    ChecklistWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
