//! Shared test helpers wiring the full service stack over in-memory adapters.

use std::io;
use std::sync::Arc;

use comenius::group::{
    adapters::{broadcast::BroadcastGroupChannel, memory::InMemoryGroupRepository},
    services::GroupChatService,
};
use comenius::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, UserId, UserProfile},
};
use comenius::submission::{
    adapters::memory::InMemorySubmissionRepository, services::SubmissionService,
};
use comenius::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{DashboardService, TaskWorkflowService},
};
use mockable::DefaultClock;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Task workflow service wired to the in-memory adapters.
pub type Workflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryGroupRepository,
    InMemorySubmissionRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Submission flow service wired to the in-memory adapters.
pub type Submissions = SubmissionService<
    InMemorySubmissionRepository,
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Group chat service wired to the broadcast channel adapter.
pub type Chat = GroupChatService<
    InMemoryGroupRepository,
    BroadcastGroupChannel,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Dashboard service wired to the in-memory task store.
pub type Dashboard = DashboardService<InMemoryTaskRepository, DefaultClock>;

/// Full application stack sharing one set of in-memory stores.
pub struct Stack {
    /// Task store shared by every service.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Submission store shared by the workflow and flow services.
    pub submissions: Arc<InMemorySubmissionRepository>,
    /// Group store the workflow provisions into.
    pub groups: Arc<InMemoryGroupRepository>,
    /// User directory backing identity lookups.
    pub directory: Arc<InMemoryUserDirectory>,
    /// Broadcast channel carrying chat messages.
    pub channel: Arc<BroadcastGroupChannel>,
    /// Task workflow service under test.
    pub workflow: Workflow,
    /// Submission flow service under test.
    pub submission_flow: Submissions,
    /// Group chat service under test.
    pub chat: Chat,
    /// Dashboard service under test.
    pub dashboard: Dashboard,
}

impl Stack {
    fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let groups = Arc::new(InMemoryGroupRepository::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let channel = Arc::new(BroadcastGroupChannel::new());
        let clock = Arc::new(DefaultClock);

        let workflow = TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&groups),
            Arc::clone(&submissions),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );
        let submission_flow = SubmissionService::new(
            Arc::clone(&submissions),
            Arc::clone(&tasks),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );
        let chat = GroupChatService::new(
            Arc::clone(&groups),
            Arc::clone(&channel),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );
        let dashboard = DashboardService::new(Arc::clone(&tasks), Arc::clone(&clock));

        Self {
            tasks,
            submissions,
            groups,
            directory,
            channel,
            workflow,
            submission_flow,
            chat,
            dashboard,
        }
    }

    /// Registers a member in the directory and returns their acting identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the profile.
    pub fn register_member(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Actor, Box<dyn std::error::Error + Send + Sync>> {
        let actor = Actor::member(UserId::new());
        self.directory
            .insert(UserProfile::new(actor.id(), name, email))?;
        Ok(actor)
    }
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a freshly wired service stack for each test.
#[fixture]
pub fn stack() -> Stack {
    Stack::new()
}

/// Provides an administrator for privileged operations.
#[fixture]
pub fn admin() -> Actor {
    Actor::admin(UserId::new())
}
