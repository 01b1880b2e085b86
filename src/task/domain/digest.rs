//! Compact task projection for dashboards and submission listings.

use super::{Task, TaskCategory, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary view of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDigest {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task category.
    pub category: TaskCategory,
    /// Current status.
    pub status: TaskStatus,
    /// Priority level.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskDigest {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            category: task.category(),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            created_at: task.created_at(),
        }
    }
}
