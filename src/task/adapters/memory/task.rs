//! In-memory repository for task workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskDigest, TaskId, TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_scope(task: &Task, scope: TaskScope) -> bool {
    match scope {
        TaskScope::All => true,
        TaskScope::AssignedTo(user) => task.is_assignee(user),
    }
}

fn matches(task: &Task, filter: &TaskFilter) -> bool {
    in_scope(task, filter.scope())
        && filter.status().is_none_or(|status| task.status() == status)
        && filter.status_not().is_none_or(|status| task.status() != status)
        && filter
            .category()
            .is_none_or(|category| task.category() == category)
        && filter
            .due_before()
            .is_none_or(|instant| task.due_date() < instant)
}

fn newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| matches(task, filter))
            .cloned()
            .collect();
        newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let count = state
            .tasks
            .values()
            .filter(|task| matches(task, filter))
            .count();
        u64::try_from(count).map_err(TaskRepositoryError::persistence)
    }

    async fn status_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskStatus, u64)>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut counts: HashMap<TaskStatus, u64> = HashMap::new();
        for task in state.tasks.values().filter(|task| in_scope(task, scope)) {
            *counts.entry(task.status()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn priority_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskPriority, u64)>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut counts: HashMap<TaskPriority, u64> = HashMap::new();
        for task in state.tasks.values().filter(|task| in_scope(task, scope)) {
            *counts.entry(task.priority()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn recent(&self, scope: TaskScope, limit: u32) -> TaskRepositoryResult<Vec<TaskDigest>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| in_scope(task, scope))
            .cloned()
            .collect();
        newest_first(&mut tasks);
        tasks.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(tasks.iter().map(TaskDigest::from).collect())
    }
}
