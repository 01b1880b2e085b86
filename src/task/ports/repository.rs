//! Repository port for task persistence, filtered listing, and dashboard
//! aggregation.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskCategory, TaskDigest, TaskId, TaskPriority, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Which tasks a query ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task in the store.
    All,
    /// Tasks that list the user among their assignees.
    AssignedTo(UserId),
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::All
    }
}

/// Composable filter for list and count queries.
///
/// Every unset clause matches all tasks, so `TaskFilter::all()` is the
/// unfiltered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    scope: TaskScope,
    status: Option<TaskStatus>,
    status_not: Option<TaskStatus>,
    category: Option<TaskCategory>,
    due_before: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            scope: TaskScope::All,
            status: None,
            status_not: None,
            category: None,
            due_before: None,
        }
    }

    /// Matches tasks assigned to the given user.
    #[must_use]
    pub const fn assigned_to(user: UserId) -> Self {
        Self {
            scope: TaskScope::AssignedTo(user),
            status: None,
            status_not: None,
            category: None,
            due_before: None,
        }
    }

    /// Requires an exact status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Excludes a status.
    #[must_use]
    pub const fn with_status_not(mut self, status: TaskStatus) -> Self {
        self.status_not = Some(status);
        self
    }

    /// Requires an exact category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Requires a due date strictly before the given instant.
    #[must_use]
    pub const fn with_due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }

    /// Returns the task scope.
    #[must_use]
    pub const fn scope(&self) -> TaskScope {
        self.scope
    }

    /// Returns the required status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the excluded status, if set.
    #[must_use]
    pub const fn status_not(&self) -> Option<TaskStatus> {
        self.status_not
    }

    /// Returns the required category, if set.
    #[must_use]
    pub const fn category(&self) -> Option<TaskCategory> {
        self.category
    }

    /// Returns the due-before bound, if set.
    #[must_use]
    pub const fn due_before(&self) -> Option<DateTime<Utc>> {
        self.due_before
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks matching the filter, most recently created first.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks matching the filter.
    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64>;

    /// Counts tasks in scope grouped by status.
    ///
    /// Statuses with no tasks may be absent from the result.
    async fn status_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskStatus, u64)>>;

    /// Counts tasks in scope grouped by priority.
    ///
    /// Priorities with no tasks may be absent from the result.
    async fn priority_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskPriority, u64)>>;

    /// Returns digests of the most recently created tasks in scope.
    async fn recent(&self, scope: TaskScope, limit: u32) -> TaskRepositoryResult<Vec<TaskDigest>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
