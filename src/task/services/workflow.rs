//! Service layer for the task lifecycle: creation with group provisioning,
//! partial updates, checklist replacement, status changes, question
//! maintenance, and cascading deletion.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::group::{
    domain::{Group, GroupDomainError, GroupId},
    ports::{GroupRepository, GroupRepositoryError},
};
use crate::identity::{
    domain::{Actor, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::policy::{self, AccessDenied, TaskAction};
use crate::submission::ports::{SubmissionRepository, SubmissionRepositoryError};
use crate::task::{
    domain::{
        ChecklistItem, EssayQuestion, MultipleChoiceQuestion, NewTaskData, ProblemItem,
        ProblemItemId, QuestionId, QuestionKind, QuestionSetUpdate, Task, TaskCategory,
        TaskDetailsUpdate, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskScope},
};

/// Request payload for creating a task.
///
/// The category is an explicit field, fixed for the task's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    category: TaskCategory,
    due_date: DateTime<Utc>,
    description: Option<String>,
    priority: TaskPriority,
    assignees: Vec<UserId>,
    attachments: Vec<String>,
    checklist: Vec<ChecklistItem>,
    essay_questions: Vec<EssayQuestion>,
    choice_questions: Vec<MultipleChoiceQuestion>,
    problem_items: Vec<ProblemItem>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: TaskCategory,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            due_date,
            description: None,
            priority: TaskPriority::default(),
            assignees: Vec::new(),
            attachments: Vec::new(),
            checklist: Vec::new(),
            essay_questions: Vec::new(),
            choice_questions: Vec::new(),
            problem_items: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Sets the initial checklist.
    #[must_use]
    pub fn with_checklist(mut self, checklist: impl IntoIterator<Item = ChecklistItem>) -> Self {
        self.checklist = checklist.into_iter().collect();
        self
    }

    /// Sets the essay questions.
    #[must_use]
    pub fn with_essay_questions(
        mut self,
        questions: impl IntoIterator<Item = EssayQuestion>,
    ) -> Self {
        self.essay_questions = questions.into_iter().collect();
        self
    }

    /// Sets the multiple-choice questions.
    #[must_use]
    pub fn with_choice_questions(
        mut self,
        questions: impl IntoIterator<Item = MultipleChoiceQuestion>,
    ) -> Self {
        self.choice_questions = questions.into_iter().collect();
        self
    }

    /// Sets the problem sub-items; each gets a chat group at creation.
    #[must_use]
    pub fn with_problem_items(mut self, items: impl IntoIterator<Item = ProblemItem>) -> Self {
        self.problem_items = items.into_iter().collect();
        self
    }
}

/// A task joined with the resolved profiles of its assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithAssignees {
    /// The task itself.
    pub task: Task,
    /// Profiles for assignees known to the directory, in assignee order.
    pub assignees: Vec<UserProfile>,
}

/// One row of a task listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOverview {
    /// The task itself.
    pub task: Task,
    /// Number of completed checklist items.
    pub completed_items: usize,
    /// Profiles for assignees known to the directory, in assignee order.
    pub assignees: Vec<UserProfile>,
}

/// Status counts over a scope, ignoring any listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusSummary {
    /// Tasks in any status.
    pub all: u64,
    /// Tasks still pending.
    pub pending: u64,
    /// Tasks in progress.
    pub in_progress: u64,
    /// Completed tasks.
    pub completed: u64,
}

impl StatusSummary {
    /// Builds a summary from a status histogram; absent statuses count
    /// zero.
    #[must_use]
    pub fn from_histogram(histogram: &[(TaskStatus, u64)]) -> Self {
        let mut summary = Self::default();
        for &(status, count) in histogram {
            match status {
                TaskStatus::Pending => summary.pending = count,
                TaskStatus::InProgress => summary.in_progress = count,
                TaskStatus::Completed => summary.completed = count,
            }
            summary.all += count;
        }
        summary
    }
}

/// A filtered task listing plus its scope-wide status summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Matching tasks, most recently created first.
    pub tasks: Vec<TaskOverview>,
    /// Status counts over the whole scope, unaffected by the filter.
    pub summary: StatusSummary,
}

/// A problem sub-item's chat group with resolved member profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemGroup {
    /// The provisioned group.
    pub group: Group,
    /// Profiles for members known to the directory, in member order.
    pub members: Vec<UserProfile>,
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Group construction failed.
    #[error(transparent)]
    GroupDomain(#[from] GroupDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The problem sub-item does not exist or has no linked group.
    #[error("no group linked to problem item {0}")]
    ProblemGroupNotFound(ProblemItemId),

    /// A linked group record is missing from the store.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// The actor may not perform the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Group persistence failed.
    #[error("group repository error: {0}")]
    Groups(#[from] GroupRepositoryError),

    /// Submission persistence failed during a cascade.
    #[error("submission repository error: {0}")]
    Submissions(#[from] SubmissionRepositoryError),

    /// Profile lookup failed.
    #[error("user directory error: {0}")]
    Directory(#[from] UserDirectoryError),
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, G, S, D, C>
where
    R: TaskRepository,
    G: GroupRepository,
    S: SubmissionRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    groups: Arc<G>,
    submissions: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, G, S, D, C> TaskWorkflowService<R, G, S, D, C>
where
    R: TaskRepository,
    G: GroupRepository,
    S: SubmissionRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        groups: Arc<G>,
        submissions: Arc<S>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            groups,
            submissions,
            directory,
            clock,
        }
    }

    /// Creates a task, provisioning one chat group per problem sub-item.
    ///
    /// The task is persisted first; groups are created afterwards and the
    /// sub-item links patched in with a second write. A failure between the
    /// two writes leaves a task whose sub-items are not yet linked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] for non-admin actors and
    /// [`TaskWorkflowError::Domain`] when the title is empty.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        policy::require_admin(actor)?;

        let data = NewTaskData {
            title: request.title,
            description: request.description,
            priority: request.priority,
            category: request.category,
            due_date: request.due_date,
            checklist: request.checklist,
            assignees: request.assignees,
            created_by: actor.id(),
            attachments: request.attachments,
            essay_questions: request.essay_questions,
            choice_questions: request.choice_questions,
            problem_items: request.problem_items,
        };
        let mut task = Task::new(data, &*self.clock)?;
        self.repository.store(&task).await?;

        if task.problem_items().is_empty() {
            return Ok(task);
        }

        let mut members: Vec<UserId> = task.assignees().to_vec();
        members.push(task.created_by());

        let item_ids: Vec<ProblemItemId> =
            task.problem_items().iter().map(ProblemItem::id).collect();
        for (index, item_id) in item_ids.into_iter().enumerate() {
            let name = format!("{} - Problem {}", task.title(), index + 1);
            let group = Group::new(name, members.clone(), task.id(), Some(item_id), &*self.clock)?;
            self.groups.store(&group).await?;
            task.link_problem_group(item_id, group.id(), &*self.clock)?;
        }
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Applies a partial details update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist and [`TaskWorkflowError::Domain`] when a supplied title is
    /// empty.
    pub async fn update_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        update: TaskDetailsUpdate,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::UpdateDetails, &task)?;

        task.update_details(update, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Applies a questions-only update to an assessment task.
    ///
    /// The declared category must match the task's stored category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist, [`TaskWorkflowError::Forbidden`] for non-admin actors, and
    /// [`TaskWorkflowError::Domain`] on category mismatch.
    pub async fn update_questions(
        &self,
        actor: &Actor,
        task_id: TaskId,
        declared: TaskCategory,
        update: QuestionSetUpdate,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::ManageQuestions, &task)?;

        task.apply_question_update(declared, update, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Removes a question by identity from the list named by `kind`.
    ///
    /// Returns `true` when a question was removed. An unknown question
    /// identifier is a silent no-op and performs no repository write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist and [`TaskWorkflowError::Forbidden`] for non-admin actors.
    pub async fn delete_question(
        &self,
        actor: &Actor,
        task_id: TaskId,
        kind: QuestionKind,
        question_id: QuestionId,
    ) -> TaskWorkflowResult<bool> {
        let mut task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::ManageQuestions, &task)?;

        let removed = task.remove_question(kind, question_id, &*self.clock);
        if removed {
            self.repository.update(&task).await?;
        }
        Ok(removed)
    }

    /// Sets a task's status verbatim.
    ///
    /// `Completed` cascades over the checklist; see [`Task::set_status`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist and [`TaskWorkflowError::Forbidden`] when the actor is neither
    /// an assignee nor an admin.
    pub async fn set_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::SetStatus, &task)?;

        task.set_status(status, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Replaces a task's checklist wholesale, re-deriving progress and
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist and [`TaskWorkflowError::Forbidden`] when the actor is neither
    /// an assignee nor an admin.
    pub async fn replace_checklist(
        &self,
        actor: &Actor,
        task_id: TaskId,
        items: Vec<ChecklistItem>,
    ) -> TaskWorkflowResult<TaskWithAssignees> {
        let mut task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::ReplaceChecklist, &task)?;

        task.replace_checklist(items, &*self.clock);
        self.repository.update(&task).await?;

        let assignees = self.directory.find_many(task.assignees()).await?;
        Ok(TaskWithAssignees { task, assignees })
    }

    /// Deletes a task together with its submissions and groups.
    ///
    /// The cascade runs submissions first, then groups, then the task
    /// record. The steps are not atomic across stores.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist and [`TaskWorkflowError::Forbidden`] for non-admin actors.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<()> {
        let task = self.require_task(task_id).await?;
        policy::authorize_task(actor, TaskAction::Delete, &task)?;

        self.submissions.delete_by_task(task_id).await?;
        self.groups.delete_by_task(task_id).await?;
        self.repository.delete(task_id).await?;
        Ok(())
    }

    /// Returns a task with its assignee profiles.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn find_task(&self, task_id: TaskId) -> TaskWorkflowResult<TaskWithAssignees> {
        let task = self.require_task(task_id).await?;
        let assignees = self.directory.find_many(task.assignees()).await?;
        Ok(TaskWithAssignees { task, assignees })
    }

    /// Lists tasks in scope with an optional status filter.
    ///
    /// Every row carries its completed-checklist count and assignee
    /// profiles. The attached status summary always covers the whole scope,
    /// ignoring the status filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the listing or the
    /// summary counts fail.
    pub async fn list_tasks(
        &self,
        scope: TaskScope,
        status: Option<TaskStatus>,
    ) -> TaskWorkflowResult<TaskList> {
        let mut filter = match scope {
            TaskScope::All => TaskFilter::all(),
            TaskScope::AssignedTo(user) => TaskFilter::assigned_to(user),
        };
        if let Some(wanted) = status {
            filter = filter.with_status(wanted);
        }

        let tasks = self.repository.list(&filter).await?;
        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let assignees = self.directory.find_many(task.assignees()).await?;
            let completed_items = task.completed_items();
            rows.push(TaskOverview {
                task,
                completed_items,
                assignees,
            });
        }

        let summary = self.status_summary(scope).await?;
        Ok(TaskList {
            tasks: rows,
            summary,
        })
    }

    /// Lists tasks of one category, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the listing fails.
    pub async fn list_by_category(&self, category: TaskCategory) -> TaskWorkflowResult<Vec<Task>> {
        let filter = TaskFilter::all().with_category(category);
        Ok(self.repository.list(&filter).await?)
    }

    /// Resolves the chat group provisioned for a problem sub-item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist, [`TaskWorkflowError::ProblemGroupNotFound`] when the sub-item
    /// is missing or was never linked, and
    /// [`TaskWorkflowError::GroupNotFound`] when the linked group record is
    /// gone.
    pub async fn problem_group(
        &self,
        task_id: TaskId,
        problem_item_id: ProblemItemId,
    ) -> TaskWorkflowResult<ProblemGroup> {
        let task = self.require_task(task_id).await?;
        let group_id = task
            .problem_item(problem_item_id)
            .and_then(ProblemItem::group_id)
            .ok_or(TaskWorkflowError::ProblemGroupNotFound(problem_item_id))?;
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(TaskWorkflowError::GroupNotFound(group_id))?;

        let members = self.directory.find_many(group.members()).await?;
        Ok(ProblemGroup { group, members })
    }

    async fn require_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(id))
    }

    async fn status_summary(&self, scope: TaskScope) -> TaskWorkflowResult<StatusSummary> {
        let histogram = self.repository.status_histogram(scope).await?;
        Ok(StatusSummary::from_histogram(&histogram))
    }
}
