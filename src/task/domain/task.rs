//! Task aggregate root and the checklist-progress derivation rules.

use super::{
    ChecklistItem, EssayQuestion, MultipleChoiceQuestion, ProblemItem, ProblemItemId, Progress,
    QuestionId, QuestionKind, TaskCategory, TaskDomainError, TaskId, TaskPriority, TaskStatus,
};
use crate::group::domain::GroupId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Progress and status are derived fields: whenever the checklist is
/// replaced, progress becomes the integer-rounded percentage of completed
/// items (zero for an empty list) and status follows it (100 is
/// `Completed`, 0 is `Pending`, anything between is `InProgress`). Setting
/// the status directly is the one sanctioned way to break that derivation;
/// see [`Task::set_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    category: TaskCategory,
    due_date: DateTime<Utc>,
    checklist: Vec<ChecklistItem>,
    progress: Progress,
    assignees: Vec<UserId>,
    created_by: UserId,
    attachments: Vec<String>,
    essay_questions: Vec<EssayQuestion>,
    choice_questions: Vec<MultipleChoiceQuestion>,
    problem_items: Vec<ProblemItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title; must not be empty after trimming.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: TaskPriority,
    /// Category fixed for the lifetime of the task.
    pub category: TaskCategory,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Initial checklist; progress and status are derived from it.
    pub checklist: Vec<ChecklistItem>,
    /// Assigned users; duplicates are dropped, order preserved.
    pub assignees: Vec<UserId>,
    /// Creating administrator.
    pub created_by: UserId,
    /// Opaque attachment references.
    pub attachments: Vec<String>,
    /// Essay questions for assessment categories.
    pub essay_questions: Vec<EssayQuestion>,
    /// Multiple-choice questions for assessment categories.
    pub choice_questions: Vec<MultipleChoiceQuestion>,
    /// Problem sub-items; group links are patched in after persistence.
    pub problem_items: Vec<ProblemItem>,
}

/// Parameter object for reconstructing a persisted task aggregate.
///
/// Reconstruction trusts storage: no derivation or validation is re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted checklist.
    pub checklist: Vec<ChecklistItem>,
    /// Persisted progress percentage.
    pub progress: Progress,
    /// Persisted assignee list.
    pub assignees: Vec<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted attachment references.
    pub attachments: Vec<String>,
    /// Persisted essay questions.
    pub essay_questions: Vec<EssayQuestion>,
    /// Persisted multiple-choice questions.
    pub choice_questions: Vec<MultipleChoiceQuestion>,
    /// Persisted problem sub-items.
    pub problem_items: Vec<ProblemItem>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of task details; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
    attachments: Option<Vec<String>>,
    assignees: Option<Vec<UserId>>,
    checklist: Option<Vec<ChecklistItem>>,
}

impl TaskDetailsUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.attachments = Some(attachments.into_iter().collect());
        self
    }

    /// Replaces the assignee list.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = Some(assignees.into_iter().collect());
        self
    }

    /// Replaces the checklist, triggering progress derivation.
    #[must_use]
    pub fn with_checklist(mut self, checklist: impl IntoIterator<Item = ChecklistItem>) -> Self {
        self.checklist = Some(checklist.into_iter().collect());
        self
    }
}

/// Partial update of the assessment fields of a task.
///
/// Used by the questions-only maintenance flow; only fields explicitly set
/// are overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSetUpdate {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    essay_questions: Option<Vec<EssayQuestion>>,
    choice_questions: Option<Vec<MultipleChoiceQuestion>>,
    problem_items: Option<Vec<ProblemItem>>,
}

impl QuestionSetUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the essay question list.
    #[must_use]
    pub fn with_essay_questions(
        mut self,
        questions: impl IntoIterator<Item = EssayQuestion>,
    ) -> Self {
        self.essay_questions = Some(questions.into_iter().collect());
        self
    }

    /// Replaces the multiple-choice question list.
    #[must_use]
    pub fn with_choice_questions(
        mut self,
        questions: impl IntoIterator<Item = MultipleChoiceQuestion>,
    ) -> Self {
        self.choice_questions = Some(questions.into_iter().collect());
        self
    }

    /// Replaces the problem sub-item list.
    ///
    /// Freshly admitted sub-items carry no group links; groups are only
    /// provisioned automatically at task creation.
    #[must_use]
    pub fn with_problem_items(mut self, items: impl IntoIterator<Item = ProblemItem>) -> Self {
        self.problem_items = Some(items.into_iter().collect());
        self
    }
}

impl Task {
    /// Creates a new task, deriving progress and status from the initial
    /// checklist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = validated_title(&data.title)?;
        let timestamp = clock.utc();

        let mut task = Self {
            id: TaskId::new(),
            title,
            description: data.description,
            priority: data.priority,
            status: TaskStatus::Pending,
            category: data.category,
            due_date: data.due_date,
            checklist: data.checklist,
            progress: Progress::ZERO,
            assignees: dedup_preserving_order(data.assignees),
            created_by: data.created_by,
            attachments: data.attachments,
            essay_questions: data.essay_questions,
            choice_questions: data.choice_questions,
            problem_items: data.problem_items,
            created_at: timestamp,
            updated_at: timestamp,
        };
        task.refresh_progress();
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            category: data.category,
            due_date: data.due_date,
            checklist: data.checklist,
            progress: data.progress,
            assignees: data.assignees,
            created_by: data.created_by,
            attachments: data.attachments,
            essay_questions: data.essay_questions,
            choice_questions: data.choice_questions,
            problem_items: data.problem_items,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the category fixed at creation.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the checklist in order.
    #[must_use]
    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    /// Returns the derived progress percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the assigned users.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }

    /// Returns the creating administrator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the attachment references.
    #[must_use]
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns the essay questions.
    #[must_use]
    pub fn essay_questions(&self) -> &[EssayQuestion] {
        &self.essay_questions
    }

    /// Returns the multiple-choice questions.
    #[must_use]
    pub fn choice_questions(&self) -> &[MultipleChoiceQuestion] {
        &self.choice_questions
    }

    /// Returns the problem sub-items.
    #[must_use]
    pub fn problem_items(&self) -> &[ProblemItem] {
        &self.problem_items
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the number of completed checklist items.
    #[must_use]
    pub fn completed_items(&self) -> usize {
        self.checklist
            .iter()
            .filter(|item| item.is_completed())
            .count()
    }

    /// Returns `true` when the user is assigned to this task.
    #[must_use]
    pub fn is_assignee(&self, user: UserId) -> bool {
        self.assignees.contains(&user)
    }

    /// Returns the problem sub-item with the given identifier, if present.
    #[must_use]
    pub fn problem_item(&self, id: ProblemItemId) -> Option<&ProblemItem> {
        self.problem_items.iter().find(|item| item.id() == id)
    }

    /// Fails unless the task's stored category matches the declared one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CategoryMismatch`] on mismatch.
    pub fn ensure_category(&self, expected: TaskCategory) -> Result<(), TaskDomainError> {
        if self.category != expected {
            return Err(TaskDomainError::CategoryMismatch { expected });
        }
        Ok(())
    }

    /// Applies a partial details update.
    ///
    /// A supplied checklist is replaced wholesale and progress and status
    /// are re-derived from it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a supplied title is
    /// empty after trimming; nothing is mutated on that path.
    pub fn update_details(
        &mut self,
        update: TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let validated = update.title.as_deref().map(validated_title).transpose()?;

        if let Some(title) = validated {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(attachments) = update.attachments {
            self.attachments = attachments;
        }
        if let Some(assignees) = update.assignees {
            self.assignees = dedup_preserving_order(assignees);
        }
        if let Some(checklist) = update.checklist {
            self.checklist = checklist;
            self.refresh_progress();
        }
        self.touch(clock);
        Ok(())
    }

    /// Replaces the checklist wholesale and re-derives progress and status.
    pub fn replace_checklist(&mut self, items: Vec<ChecklistItem>, clock: &impl Clock) {
        self.checklist = items;
        self.refresh_progress();
        self.touch(clock);
    }

    /// Sets the status verbatim.
    ///
    /// Setting `Completed` forces every checklist item to completed and
    /// progress to 100. No other status touches the checklist or progress;
    /// the cascade runs one way only.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        if matches!(status, TaskStatus::Completed) {
            for item in &mut self.checklist {
                item.mark_completed();
            }
            self.progress = Progress::COMPLETE;
        }
        self.touch(clock);
    }

    /// Applies a partial update to the assessment fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CategoryMismatch`] when the declared
    /// category does not match the stored one, or
    /// [`TaskDomainError::EmptyTitle`] when a supplied title is empty after
    /// trimming. Nothing is mutated on either path.
    pub fn apply_question_update(
        &mut self,
        declared: TaskCategory,
        update: QuestionSetUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_category(declared)?;
        let validated = update.title.as_deref().map(validated_title).transpose()?;

        if let Some(title) = validated {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(questions) = update.essay_questions {
            self.essay_questions = questions;
        }
        if let Some(questions) = update.choice_questions {
            self.choice_questions = questions;
        }
        if let Some(items) = update.problem_items {
            self.problem_items = items;
        }
        self.touch(clock);
        Ok(())
    }

    /// Removes a question by identity from the list named by `kind`.
    ///
    /// Returns `true` when a question was removed. An unknown identifier is
    /// a no-op, not an error, and leaves the update timestamp untouched.
    pub fn remove_question(
        &mut self,
        kind: QuestionKind,
        question_id: QuestionId,
        clock: &impl Clock,
    ) -> bool {
        let removed = match kind {
            QuestionKind::Essay => {
                let before = self.essay_questions.len();
                self.essay_questions
                    .retain(|question| question.id() != question_id);
                self.essay_questions.len() != before
            }
            QuestionKind::MultipleChoice => {
                let before = self.choice_questions.len();
                self.choice_questions
                    .retain(|question| question.id() != question_id);
                self.choice_questions.len() != before
            }
        };
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Links a problem sub-item to its provisioned chat group.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProblemItemNotFound`] when the sub-item
    /// does not exist on this task.
    pub fn link_problem_group(
        &mut self,
        item_id: ProblemItemId,
        group_id: GroupId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let item = self
            .problem_items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or(TaskDomainError::ProblemItemNotFound(item_id))?;
        item.link_group(group_id);
        self.touch(clock);
        Ok(())
    }

    /// Re-derives progress and status from the current checklist.
    fn refresh_progress(&mut self) {
        self.progress = Progress::from_checklist(&self.checklist);
        self.status = if self.progress.is_complete() {
            TaskStatus::Completed
        } else if self.progress.is_zero() {
            TaskStatus::Pending
        } else {
            TaskStatus::InProgress
        };
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a title and rejects empty results.
fn validated_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
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
