//! Error types for task domain validation and parsing.

use super::{ProblemItemId, TaskCategory};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task's stored category does not match the declared one.
    #[error("task is not marked as {expected}")]
    CategoryMismatch {
        /// Category the caller declared for the operation.
        expected: TaskCategory,
    },

    /// The referenced problem sub-item does not exist on the task.
    #[error("problem item not found: {0}")]
    ProblemItemNotFound(ProblemItemId),
}

/// Error returned while reconstructing a progress value outside 0..=100.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("progress {0} is outside the valid range 0..=100")]
pub struct InvalidProgressError(pub u8);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseTaskCategoryError(pub String);

/// Error returned while parsing question kind discriminators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown question kind: {0}, expected 'essay' or 'multiple_choice'")]
pub struct ParseQuestionKindError(pub String);
