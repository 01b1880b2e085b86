//! In-memory repository for submission persistence tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::submission::{
    domain::{Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory submission repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionRepository {
    state: Arc<RwLock<InMemorySubmissionState>>,
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    submissions: HashMap<SubmissionId, Submission>,
    pair_index: HashMap<(TaskId, UserId), SubmissionId>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| {
        b.submitted_at()
            .cmp(&a.submitted_at())
            .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
    });
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn store(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let pair = (submission.task_id(), submission.user_id());
        if state.pair_index.contains_key(&pair) {
            return Err(SubmissionRepositoryError::DuplicateSubmission {
                task_id: submission.task_id(),
                user_id: submission.user_id(),
            });
        }
        state.pair_index.insert(pair, submission.id());
        state.submissions.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn update(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.submissions.contains_key(&submission.id()) {
            return Err(SubmissionRepositoryError::NotFound(submission.id()));
        }
        state.submissions.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn find_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Option<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .pair_index
            .get(&(task_id, user_id))
            .and_then(|id| state.submissions.get(id))
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matches: Vec<Submission> = state
            .submissions
            .values()
            .filter(|submission| submission.user_id() == user_id)
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn find_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matches: Vec<Submission> = state
            .submissions
            .values()
            .filter(|submission| submission.task_id() == task_id)
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut all: Vec<Submission> = state.submissions.values().cloned().collect();
        newest_first(&mut all);
        Ok(all)
    }

    async fn delete_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let doomed: Vec<(TaskId, UserId)> = state
            .pair_index
            .keys()
            .filter(|(candidate, _)| *candidate == task_id)
            .copied()
            .collect();
        let mut removed = 0_u64;
        for pair in doomed {
            let Some(id) = state.pair_index.remove(&pair) else {
                continue;
            };
            if state.submissions.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
