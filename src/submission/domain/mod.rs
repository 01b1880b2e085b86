//! Domain types for assessment submissions.
//!
//! A submission freezes a user's answers to a pretest or posttest task at
//! the moment of hand-in. Essay answers are marked afterwards; the
//! aggregate score is either derived from those marks or set outright.

mod ids;
mod submission;

pub use ids::SubmissionId;
pub use submission::{ChoiceAnswer, EssayAnswer, EssayScore, PersistedSubmissionData, Submission};
