//! Checklist items and the progress percentage derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single to-do entry on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    text: String,
    completed: bool,
}

impl ChecklistItem {
    /// Creates a checklist item.
    #[must_use]
    pub fn new(text: impl Into<String>, completed: bool) -> Self {
        Self {
            text: text.into(),
            completed,
        }
    }

    /// Returns the item text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when the item has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Forces the item to the completed state.
    pub const fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// Integer percentage of completed checklist items, 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Progress of a task with no completed work.
    pub const ZERO: Self = Self(0);

    /// Progress of a fully completed task.
    pub const COMPLETE: Self = Self(100);

    /// Derives progress from a checklist.
    ///
    /// The percentage is rounded half-up using integer arithmetic. An empty
    /// checklist always yields zero.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "half-up percentage rounding is exact in integer arithmetic"
    )]
    pub fn from_checklist(items: &[ChecklistItem]) -> Self {
        let total = items.len();
        if total == 0 {
            return Self::ZERO;
        }
        let completed = items.iter().filter(|item| item.is_completed()).count();
        let percent = (200 * completed + total) / (2 * total);
        Self(u8::try_from(percent).unwrap_or(100))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Returns `true` when every checklist item is complete.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }

    /// Returns `true` when no checklist item is complete.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Progress {
    type Error = super::InvalidProgressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(super::InvalidProgressError(value));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
