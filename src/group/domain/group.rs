//! Collaboration group aggregate.

use super::{GroupDomainError, GroupId};
use crate::identity::domain::UserId;
use crate::task::domain::{ProblemItemId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Chat/collaboration unit provisioned per problem sub-item.
///
/// Groups are created automatically while a problem task is created and are
/// only ever removed when their owning task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    members: Vec<UserId>,
    task_id: TaskId,
    problem_item_id: Option<ProblemItemId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGroupData {
    /// Persisted group identifier.
    pub id: GroupId,
    /// Persisted display name.
    pub name: String,
    /// Persisted member list.
    pub members: Vec<UserId>,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted problem sub-item link, if any.
    pub problem_item_id: Option<ProblemItemId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new group; duplicate members are dropped, order preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::EmptyGroupName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        members: Vec<UserId>,
        task_id: TaskId,
        problem_item_id: Option<ProblemItemId>,
        clock: &impl Clock,
    ) -> Result<Self, GroupDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GroupDomainError::EmptyGroupName);
        }
        Ok(Self {
            id: GroupId::new(),
            name: trimmed.to_owned(),
            members: dedup_preserving_order(members),
            task_id,
            problem_item_id,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a group from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGroupData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            members: data.members,
            task_id: data.task_id,
            problem_item_id: data.problem_item_id,
            created_at: data.created_at,
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member list.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the linked problem sub-item, if any.
    #[must_use]
    pub const fn problem_item_id(&self) -> Option<ProblemItemId> {
        self.problem_item_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the user belongs to this group.
    #[must_use]
    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}

/// Drops duplicate user identifiers while preserving first-seen order.
fn dedup_preserving_order(ids: Vec<UserId>) -> Vec<UserId> {
    let mut result = Vec::with_capacity(ids.len());
    for id in ids {
        if !result.contains(&id) {
            result.push(id);
        }
    }
    result
}
