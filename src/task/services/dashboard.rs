//! Dashboard aggregation over the task store.
//!
//! The admin overview and the per-user view share one shape; they differ
//! only in the scope the counts and listings range over.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use super::StatusSummary;
use crate::identity::domain::UserId;
use crate::task::{
    domain::{TaskDigest, TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskScope},
};

/// How many recently created tasks a dashboard carries.
const RECENT_TASK_LIMIT: u32 = 10;

/// Headline counts for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStatistics {
    /// Tasks in scope.
    pub total: u64,
    /// Tasks still pending.
    pub pending: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Tasks past their due date and not completed.
    pub overdue: u64,
}

/// Priority counts for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityDistribution {
    /// Low-priority tasks.
    pub low: u64,
    /// Medium-priority tasks.
    pub medium: u64,
    /// High-priority tasks.
    pub high: u64,
}

impl PriorityDistribution {
    /// Builds a distribution from a priority histogram; absent priorities
    /// count zero.
    #[must_use]
    pub fn from_histogram(histogram: &[(TaskPriority, u64)]) -> Self {
        let mut distribution = Self::default();
        for &(priority, count) in histogram {
            match priority {
                TaskPriority::Low => distribution.low = count,
                TaskPriority::Medium => distribution.medium = count,
                TaskPriority::High => distribution.high = count,
            }
        }
        distribution
    }
}

/// A fully assembled dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    /// Headline counts.
    pub statistics: TaskStatistics,
    /// Tasks per status, with the synthetic `all` bucket.
    pub status_distribution: StatusSummary,
    /// Tasks per priority.
    pub priority_distribution: PriorityDistribution,
    /// The most recently created tasks, newest first.
    pub recent_tasks: Vec<TaskDigest>,
}

/// Service-level errors for dashboard assembly.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Task store queries failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for dashboard service operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard aggregation service.
#[derive(Clone)]
pub struct DashboardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DashboardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Assembles the dashboard over every task.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Repository`] when a count or listing
    /// fails.
    pub async fn overview(&self) -> DashboardResult<DashboardData> {
        self.assemble(TaskScope::All).await
    }

    /// Assembles the dashboard over one user's assigned tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Repository`] when a count or listing
    /// fails.
    pub async fn for_user(&self, user: UserId) -> DashboardResult<DashboardData> {
        self.assemble(TaskScope::AssignedTo(user)).await
    }

    async fn assemble(&self, scope: TaskScope) -> DashboardResult<DashboardData> {
        let base = match scope {
            TaskScope::All => TaskFilter::all(),
            TaskScope::AssignedTo(user) => TaskFilter::assigned_to(user),
        };

        let total = self.repository.count(&base).await?;
        let pending = self
            .repository
            .count(&base.with_status(TaskStatus::Pending))
            .await?;
        let completed = self
            .repository
            .count(&base.with_status(TaskStatus::Completed))
            .await?;
        let overdue = self
            .repository
            .count(
                &base
                    .with_status_not(TaskStatus::Completed)
                    .with_due_before(self.clock.utc()),
            )
            .await?;

        let status_histogram = self.repository.status_histogram(scope).await?;
        let priority_histogram = self.repository.priority_histogram(scope).await?;
        let recent_tasks = self.repository.recent(scope, RECENT_TASK_LIMIT).await?;

        Ok(DashboardData {
            statistics: TaskStatistics {
                total,
                pending,
                completed,
                overdue,
            },
            status_distribution: StatusSummary::from_histogram(&status_histogram),
            priority_distribution: PriorityDistribution::from_histogram(&priority_histogram),
            recent_tasks,
        })
    }
}
