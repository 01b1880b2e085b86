//! Repository port for group persistence.

use crate::group::domain::{Group, GroupId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for group repository operations.
pub type GroupRepositoryResult<T> = Result<T, GroupRepositoryError>;

/// Group persistence contract.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Stores a new group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupRepositoryError::DuplicateGroup`] when the group ID
    /// already exists.
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()>;

    /// Finds a group by identifier.
    ///
    /// Returns `None` when the group does not exist.
    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>>;

    /// Returns all groups owned by the given task, oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<Vec<Group>>;

    /// Removes every group owned by the given task.
    ///
    /// Returns the number of groups removed; zero is not an error.
    async fn delete_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<u64>;
}

/// Errors returned by group repository implementations.
#[derive(Debug, Clone, Error)]
pub enum GroupRepositoryError {
    /// A group with the same identifier already exists.
    #[error("duplicate group identifier: {0}")]
    DuplicateGroup(GroupId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GroupRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
