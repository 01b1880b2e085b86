//! Question sets and problem sub-items carried by assessment tasks.

use super::{ParseQuestionKindError, ProblemItemId, QuestionId};
use crate::group::domain::GroupId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator naming which question list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-text essay questions.
    Essay,
    /// Multiple-choice questions.
    MultipleChoice,
}

impl QuestionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essay => "essay",
            Self::MultipleChoice => "multiple_choice",
        }
    }
}

impl TryFrom<&str> for QuestionKind {
    type Error = ParseQuestionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "essay" => Ok(Self::Essay),
            // "multipleChoice" is the camel-cased wire spelling.
            "multiple_choice" | "multiplechoice" => Ok(Self::MultipleChoice),
            _ => Err(ParseQuestionKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text question scored manually by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayQuestion {
    id: QuestionId,
    prompt: String,
}

impl EssayQuestion {
    /// Creates an essay question with a freshly generated identity.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(),
            prompt: prompt.into(),
        }
    }

    /// Returns the question identifier.
    #[must_use]
    pub const fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the question prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Question answered by selecting one of a fixed set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl MultipleChoiceQuestion {
    /// Creates a multiple-choice question with a freshly generated identity.
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(),
            prompt: prompt.into(),
            options: options.into_iter().collect(),
            answer: answer.into(),
        }
    }

    /// Returns the question identifier.
    #[must_use]
    pub const fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the question prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the selectable options.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the answer key.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Problem statement on a problem-category task.
///
/// Each sub-item is linked to its collaboration group after the task has
/// been persisted; a freshly admitted item carries no group reference yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemItem {
    id: ProblemItemId,
    prompt: String,
    group_id: Option<GroupId>,
}

impl ProblemItem {
    /// Creates a problem sub-item with a freshly generated identity.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            id: ProblemItemId::new(),
            prompt: prompt.into(),
            group_id: None,
        }
    }

    /// Returns the sub-item identifier.
    #[must_use]
    pub const fn id(&self) -> ProblemItemId {
        self.id
    }

    /// Returns the problem statement.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the linked chat group, if one has been provisioned.
    #[must_use]
    pub const fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    /// Links the sub-item to its provisioned chat group.
    pub const fn link_group(&mut self, group_id: GroupId) {
        self.group_id = Some(group_id);
    }
}
