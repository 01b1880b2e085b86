//! Repository port for submission persistence.

use crate::identity::domain::UserId;
use crate::submission::domain::{Submission, SubmissionId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for submission repository operations.
pub type SubmissionRepositoryResult<T> = Result<T, SubmissionRepositoryError>;

/// Submission persistence contract.
///
/// Uniqueness of the (task, user) pair is enforced here: services pre-check
/// for a friendlier error, but the store is the authority under races.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Stores a new submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionRepositoryError::DuplicateSubmission`] when the
    /// task and user pair already has one.
    async fn store(&self, submission: &Submission) -> SubmissionRepositoryResult<()>;

    /// Saves score changes to an existing submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionRepositoryError::NotFound`] when the submission
    /// does not exist.
    async fn update(&self, submission: &Submission) -> SubmissionRepositoryResult<()>;

    /// Finds the unique submission for a task and user pair.
    ///
    /// Returns `None` when the user has not submitted for the task.
    async fn find_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Option<Submission>>;

    /// Returns all of a user's submissions, newest first.
    async fn find_by_user(&self, user_id: UserId) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns all submissions for a task, newest first.
    async fn find_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns every submission, newest first.
    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Removes every submission for the given task.
    ///
    /// Returns the number of submissions removed; zero is not an error.
    async fn delete_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<u64>;
}

/// Errors returned by submission repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionRepositoryError {
    /// The task and user pair already has a submission.
    #[error("duplicate submission for task {task_id} by user {user_id}")]
    DuplicateSubmission {
        /// Task that was submitted to.
        task_id: TaskId,
        /// User who already submitted.
        user_id: UserId,
    },

    /// No submission with the given identifier exists.
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
