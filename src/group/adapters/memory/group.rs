//! In-memory repository for group persistence tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::group::{
    domain::{Group, GroupId},
    ports::{GroupRepository, GroupRepositoryError, GroupRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory group repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupRepository {
    state: Arc<RwLock<InMemoryGroupState>>,
}

#[derive(Debug, Default)]
struct InMemoryGroupState {
    groups: HashMap<GroupId, Group>,
    task_index: HashMap<TaskId, Vec<GroupId>>,
}

impl InMemoryGroupRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            GroupRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.groups.contains_key(&group.id()) {
            return Err(GroupRepositoryError::DuplicateGroup(group.id()));
        }
        state
            .task_index
            .entry(group.task_id())
            .or_default()
            .push(group.id());
        state.groups.insert(group.id(), group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>> {
        let state = self.state.read().map_err(|err| {
            GroupRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.groups.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<Vec<Group>> {
        let state = self.state.read().map_err(|err| {
            GroupRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut groups: Vec<Group> = state
            .task_index
            .get(&task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.groups.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        groups.sort_by_key(Group::created_at);
        Ok(groups)
    }

    async fn delete_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            GroupRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let ids = state.task_index.remove(&task_id).unwrap_or_default();
        let mut removed = 0_u64;
        for id in ids {
            if state.groups.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
