//! Domain model for the task lifecycle engine.
//!
//! The task domain owns checklist state, the derived progress/status pair,
//! category rules for assessment tasks, and question-set maintenance, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod category;
mod checklist;
mod digest;
mod error;
mod ids;
mod priority;
mod questions;
mod status;
mod task;

pub use category::TaskCategory;
pub use checklist::{ChecklistItem, Progress};
pub use digest::TaskDigest;
pub use error::{
    InvalidProgressError, ParseQuestionKindError, ParseTaskCategoryError, ParseTaskPriorityError,
    ParseTaskStatusError, TaskDomainError,
};
pub use ids::{ProblemItemId, QuestionId, TaskId};
pub use priority::TaskPriority;
pub use questions::{EssayQuestion, MultipleChoiceQuestion, ProblemItem, QuestionKind};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, QuestionSetUpdate, Task, TaskDetailsUpdate};
