//! Diesel schema for submission persistence.

diesel::table! {
    /// Submission records, unique per task and user pair.
    submissions (id) {
        /// Internal submission identifier.
        id -> Uuid,
        /// Task the answers belong to.
        task_id -> Uuid,
        /// Submitting user.
        user_id -> Uuid,
        /// Essay answer JSON array.
        essay_answers -> Jsonb,
        /// Multiple-choice answer JSON array.
        choice_answers -> Jsonb,
        /// Aggregate score, absent until marking happens.
        score -> Nullable<BigInt>,
        /// Submission instant.
        submitted_at -> Timestamptz,
    }
}
