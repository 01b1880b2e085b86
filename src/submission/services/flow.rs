//! Service layer for assessment hand-in and scoring.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::identity::{
    domain::{Actor, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::policy::{self, AccessDenied};
use crate::submission::{
    domain::{ChoiceAnswer, EssayAnswer, EssayScore, Submission},
    ports::{SubmissionRepository, SubmissionRepositoryError},
};
use crate::task::{
    domain::{Task, TaskCategory, TaskDigest, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};

/// Request payload for handing in assessment answers.
///
/// The category declares which assessment kind the caller believes the task
/// to be; a mismatch with the stored category is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAnswersRequest {
    category: TaskCategory,
    essay_answers: Vec<EssayAnswer>,
    choice_answers: Vec<ChoiceAnswer>,
}

impl SubmitAnswersRequest {
    /// Creates a request for the declared assessment category.
    #[must_use]
    pub const fn new(category: TaskCategory) -> Self {
        Self {
            category,
            essay_answers: Vec::new(),
            choice_answers: Vec::new(),
        }
    }

    /// Sets the essay answers.
    #[must_use]
    pub fn with_essay_answers(mut self, answers: impl IntoIterator<Item = EssayAnswer>) -> Self {
        self.essay_answers = answers.into_iter().collect();
        self
    }

    /// Sets the multiple-choice answers.
    #[must_use]
    pub fn with_choice_answers(mut self, answers: impl IntoIterator<Item = ChoiceAnswer>) -> Self {
        self.choice_answers = answers.into_iter().collect();
        self
    }
}

/// A submission joined with the digest of its assessment task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOverview {
    /// The submission itself.
    pub submission: Submission,
    /// Digest of the task the answers belong to.
    pub task: TaskDigest,
}

/// A submission joined with task digest and submitter profile.
///
/// Either join may be absent when the referenced record no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// The submission itself.
    pub submission: Submission,
    /// Digest of the task, when it still exists.
    pub task: Option<TaskDigest>,
    /// Profile of the submitter, when the directory knows them.
    pub user: Option<UserProfile>,
}

/// Service-level errors for submission operations.
#[derive(Debug, Error)]
pub enum SubmissionFlowError {
    /// The category does not accept submissions.
    #[error("category {0} does not accept submissions")]
    UnsupportedCategory(TaskCategory),

    /// Task-side validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The user already submitted for this task.
    #[error("task {task_id} already submitted by user {user_id}")]
    AlreadySubmitted {
        /// Task that was submitted to.
        task_id: TaskId,
        /// User who already submitted.
        user_id: UserId,
    },

    /// No submission matches the task, user, and category.
    #[error("no {category} submission for task {task_id} by user {user_id}")]
    SubmissionNotFound {
        /// Declared assessment category.
        category: TaskCategory,
        /// Task searched for.
        task_id: TaskId,
        /// User searched for.
        user_id: UserId,
    },

    /// The actor may not perform the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Submission persistence failed.
    #[error(transparent)]
    Submissions(#[from] SubmissionRepositoryError),

    /// Task lookup failed.
    #[error("task repository error: {0}")]
    Tasks(#[from] TaskRepositoryError),

    /// Profile lookup failed.
    #[error("user directory error: {0}")]
    Directory(#[from] UserDirectoryError),
}

/// Result type for submission service operations.
pub type SubmissionFlowResult<T> = Result<T, SubmissionFlowError>;

/// Submission orchestration service.
#[derive(Clone)]
pub struct SubmissionService<S, T, D, C>
where
    S: SubmissionRepository,
    T: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    submissions: Arc<S>,
    tasks: Arc<T>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, T, D, C> SubmissionService<S, T, D, C>
where
    S: SubmissionRepository,
    T: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new submission service.
    #[must_use]
    pub const fn new(submissions: Arc<S>, tasks: Arc<T>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            submissions,
            tasks,
            directory,
            clock,
        }
    }

    /// Hands in the actor's answers for an assessment task.
    ///
    /// Each user submits at most once per task; a second hand-in is
    /// rejected and the original row is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::UnsupportedCategory`] when the
    /// declared category is not an assessment kind,
    /// [`SubmissionFlowError::TaskNotFound`] when the task is missing,
    /// [`SubmissionFlowError::Domain`] when the declared category does not
    /// match the stored one, and [`SubmissionFlowError::AlreadySubmitted`]
    /// on a repeat hand-in.
    pub async fn submit(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: SubmitAnswersRequest,
    ) -> SubmissionFlowResult<Submission> {
        ensure_submittable(request.category)?;
        let task = self.require_task(task_id).await?;
        task.ensure_category(request.category)?;

        let user_id = actor.id();
        if self
            .submissions
            .find_by_task_and_user(task_id, user_id)
            .await?
            .is_some()
        {
            return Err(SubmissionFlowError::AlreadySubmitted { task_id, user_id });
        }

        let submission = Submission::new(
            task_id,
            user_id,
            request.essay_answers,
            request.choice_answers,
            &*self.clock,
        );
        // The store enforces uniqueness under races the pre-check missed.
        self.submissions
            .store(&submission)
            .await
            .map_err(|err| match err {
                SubmissionRepositoryError::DuplicateSubmission { .. } => {
                    SubmissionFlowError::AlreadySubmitted { task_id, user_id }
                }
                other => SubmissionFlowError::Submissions(other),
            })?;
        Ok(submission)
    }

    /// Returns a user's submissions of one assessment category, each joined
    /// with its task digest.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::UnsupportedCategory`] when the
    /// category is not an assessment kind and
    /// [`SubmissionFlowError::Forbidden`] when the actor is neither the
    /// user nor an admin.
    pub async fn submissions_for_user(
        &self,
        actor: &Actor,
        user_id: UserId,
        category: TaskCategory,
    ) -> SubmissionFlowResult<Vec<SubmissionOverview>> {
        ensure_submittable(category)?;
        policy::require_self_or_admin(actor, user_id)?;

        let submissions = self.submissions.find_by_user(user_id).await?;
        let mut rows = Vec::new();
        for submission in submissions {
            let Some(task) = self.tasks.find_by_id(submission.task_id()).await? else {
                continue;
            };
            if task.category() != category {
                continue;
            }
            rows.push(SubmissionOverview {
                submission,
                task: TaskDigest::from(&task),
            });
        }
        Ok(rows)
    }

    /// Returns every submission, joined with task digests and submitter
    /// profiles.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::Forbidden`] for non-admin actors.
    pub async fn all_submissions(
        &self,
        actor: &Actor,
    ) -> SubmissionFlowResult<Vec<SubmissionRecord>> {
        policy::require_admin(actor)?;
        let submissions = self.submissions.list_all().await?;
        self.join_records(submissions).await
    }

    /// Returns a task's submissions, joined with task digests and
    /// submitter profiles.
    ///
    /// A task with no submissions yields an empty list, whether or not the
    /// task exists.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::Forbidden`] for non-admin actors.
    pub async fn submissions_for_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> SubmissionFlowResult<Vec<SubmissionRecord>> {
        policy::require_admin(actor)?;
        let submissions = self.submissions.find_by_task(task_id).await?;
        self.join_records(submissions).await
    }

    /// Applies per-question essay scores across a user's submissions of
    /// one assessment category.
    ///
    /// Each touched submission's aggregate is recomputed as the sum of its
    /// essay scores. Returns how many answers changed; zero means nothing
    /// was written.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::Forbidden`] for non-admin actors and
    /// [`SubmissionFlowError::UnsupportedCategory`] when the category is
    /// not an assessment kind.
    pub async fn score_essays(
        &self,
        actor: &Actor,
        user_id: UserId,
        category: TaskCategory,
        scores: &[EssayScore],
    ) -> SubmissionFlowResult<usize> {
        policy::require_admin(actor)?;
        ensure_submittable(category)?;

        let submissions = self.submissions.find_by_user(user_id).await?;
        let mut total_updated = 0_usize;
        for mut submission in submissions {
            if !self.task_matches(submission.task_id(), category).await? {
                continue;
            }
            let updated = submission.apply_essay_scores(scores);
            if updated > 0 {
                self.submissions.update(&submission).await?;
                total_updated += updated;
            }
        }
        Ok(total_updated)
    }

    /// Overwrites the aggregate score of one submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionFlowError::Forbidden`] for non-admin actors,
    /// [`SubmissionFlowError::UnsupportedCategory`] when the category is
    /// not an assessment kind, and
    /// [`SubmissionFlowError::SubmissionNotFound`] when no submission
    /// matches the task, user, and category.
    pub async fn set_total_score(
        &self,
        actor: &Actor,
        category: TaskCategory,
        task_id: TaskId,
        user_id: UserId,
        score: u32,
    ) -> SubmissionFlowResult<Submission> {
        policy::require_admin(actor)?;
        ensure_submittable(category)?;

        let not_found = || SubmissionFlowError::SubmissionNotFound {
            category,
            task_id,
            user_id,
        };
        let mut submission = self
            .submissions
            .find_by_task_and_user(task_id, user_id)
            .await?
            .ok_or_else(not_found)?;
        if !self.task_matches(task_id, category).await? {
            return Err(not_found());
        }

        submission.set_total_score(score);
        self.submissions.update(&submission).await?;
        Ok(submission)
    }

    async fn require_task(&self, id: TaskId) -> SubmissionFlowResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(SubmissionFlowError::TaskNotFound(id))
    }

    async fn task_matches(
        &self,
        task_id: TaskId,
        category: TaskCategory,
    ) -> SubmissionFlowResult<bool> {
        let task = self.tasks.find_by_id(task_id).await?;
        Ok(task.is_some_and(|task| task.category() == category))
    }

    async fn join_records(
        &self,
        submissions: Vec<Submission>,
    ) -> SubmissionFlowResult<Vec<SubmissionRecord>> {
        let mut records = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let task = self
                .tasks
                .find_by_id(submission.task_id())
                .await?
                .map(|task| TaskDigest::from(&task));
            let user = self.directory.find(submission.user_id()).await?;
            records.push(SubmissionRecord {
                submission,
                task,
                user,
            });
        }
        Ok(records)
    }
}

/// Rejects categories that do not accept submissions.
const fn ensure_submittable(category: TaskCategory) -> SubmissionFlowResult<()> {
    if category.accepts_submissions() {
        Ok(())
    } else {
        Err(SubmissionFlowError::UnsupportedCategory(category))
    }
}
