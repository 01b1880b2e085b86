//! Submission aggregate for assessment answers and scoring.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::SubmissionId;
use crate::identity::domain::UserId;
use crate::task::domain::{QuestionId, TaskId};

/// A single essay answer, scored after the fact by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayAnswer {
    question_id: QuestionId,
    text: String,
    score: Option<u32>,
}

impl EssayAnswer {
    /// Creates an unscored essay answer.
    #[must_use]
    pub const fn new(question_id: QuestionId, text: String) -> Self {
        Self {
            question_id,
            text,
            score: None,
        }
    }

    /// Returns the question this answer targets.
    #[must_use]
    pub const fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the answer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the awarded score, if the answer has been marked.
    #[must_use]
    pub const fn score(&self) -> Option<u32> {
        self.score
    }
}

/// A multiple-choice answer; graded externally, never scored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceAnswer {
    question_id: QuestionId,
    selected: String,
}

impl ChoiceAnswer {
    /// Creates a choice answer.
    #[must_use]
    pub const fn new(question_id: QuestionId, selected: String) -> Self {
        Self {
            question_id,
            selected,
        }
    }

    /// Returns the question this answer targets.
    #[must_use]
    pub const fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the selected option text.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }
}

/// Score awarded to one essay answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EssayScore {
    /// Question the score applies to.
    pub question_id: QuestionId,
    /// Points awarded.
    pub score: u32,
}

/// Parameter object for reconstructing a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubmissionData {
    /// Persisted submission identifier.
    pub id: SubmissionId,
    /// Task the answers belong to.
    pub task_id: TaskId,
    /// Submitting user.
    pub user_id: UserId,
    /// Persisted essay answers, scored or not.
    pub essay_answers: Vec<EssayAnswer>,
    /// Persisted multiple-choice answers.
    pub choice_answers: Vec<ChoiceAnswer>,
    /// Persisted aggregate score.
    pub score: Option<u32>,
    /// Persisted submission instant.
    pub submitted_at: DateTime<Utc>,
}

/// A user's one-shot answer set for an assessment task.
///
/// At most one submission exists per task and user; the uniqueness is
/// enforced by the repository, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    id: SubmissionId,
    task_id: TaskId,
    user_id: UserId,
    essay_answers: Vec<EssayAnswer>,
    choice_answers: Vec<ChoiceAnswer>,
    score: Option<u32>,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a submission stamped with the current clock time.
    ///
    /// Empty answer lists are accepted; an assessment may consist of only
    /// one question kind.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        essay_answers: Vec<EssayAnswer>,
        choice_answers: Vec<ChoiceAnswer>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            task_id,
            user_id,
            essay_answers,
            choice_answers,
            score: None,
            submitted_at: clock.utc(),
        }
    }

    /// Reconstructs a submission from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubmissionData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            essay_answers: data.essay_answers,
            choice_answers: data.choice_answers,
            score: data.score,
            submitted_at: data.submitted_at,
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the task the answers belong to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the essay answers.
    #[must_use]
    pub fn essay_answers(&self) -> &[EssayAnswer] {
        &self.essay_answers
    }

    /// Returns the multiple-choice answers.
    #[must_use]
    pub fn choice_answers(&self) -> &[ChoiceAnswer] {
        &self.choice_answers
    }

    /// Returns the aggregate score, if any marking has happened.
    #[must_use]
    pub const fn score(&self) -> Option<u32> {
        self.score
    }

    /// Returns the submission instant.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Applies per-question essay scores and refreshes the aggregate.
    ///
    /// Scores whose question does not appear among this submission's essay
    /// answers are ignored. Returns the number of answers updated; when it
    /// is zero the aggregate is left untouched.
    pub fn apply_essay_scores(&mut self, scores: &[EssayScore]) -> usize {
        let mut updated = 0_usize;
        for answer in &mut self.essay_answers {
            if let Some(entry) = scores
                .iter()
                .find(|entry| entry.question_id == answer.question_id)
            {
                answer.score = Some(entry.score);
                updated += 1;
            }
        }
        if updated > 0 {
            self.refresh_aggregate_score();
        }
        updated
    }

    /// Overwrites the aggregate score directly.
    ///
    /// Used for whole-submission marking; per-answer scores are left as
    /// they are.
    pub const fn set_total_score(&mut self, score: u32) {
        self.score = Some(score);
    }

    /// Recomputes the aggregate as the sum of marked essay answers.
    fn refresh_aggregate_score(&mut self) {
        let total = self
            .essay_answers
            .iter()
            .fold(0_u32, |sum, answer| {
                sum.saturating_add(answer.score.unwrap_or(0))
            });
        self.score = Some(total);
    }
}
