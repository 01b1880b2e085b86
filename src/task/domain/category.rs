//! Task categories fixed at creation time.
//!
//! The category is an explicit enum chosen by the calling edge layer when a
//! task is created, replacing the boolean pretest/posttest/problem flags of
//! earlier revisions. Exactly one category describes any task.

use super::ParseTaskCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of assignment a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Ordinary checklist-driven assignment.
    Regular,
    /// Pre-instruction assessment accepting one submission per user.
    Pretest,
    /// Post-instruction assessment accepting one submission per user.
    Posttest,
    /// Problem-based assignment whose sub-items each get a chat group.
    Problem,
}

impl TaskCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Pretest => "pretest",
            Self::Posttest => "posttest",
            Self::Problem => "problem",
        }
    }

    /// Returns `true` when tasks of this category accept answer submissions.
    #[must_use]
    pub const fn accepts_submissions(self) -> bool {
        matches!(self, Self::Pretest | Self::Posttest)
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "regular" => Ok(Self::Regular),
            "pretest" => Ok(Self::Pretest),
            // "postest" is a legacy wire spelling still sent by old clients.
            "posttest" | "postest" => Ok(Self::Posttest),
            "problem" => Ok(Self::Problem),
            _ => Err(ParseTaskCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
