//! Diesel row models for submission persistence.

use super::schema::submissions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for submission records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubmissionRow {
    /// Internal submission identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task the answers belong to.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub task_id: uuid::Uuid,
    /// Submitting user.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub user_id: uuid::Uuid,
    /// Essay answer JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub essay_answers: Value,
    /// Multiple-choice answer JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub choice_answers: Value,
    /// Aggregate score.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::BigInt>)]
    pub score: Option<i64>,
    /// Submission instant.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub submitted_at: DateTime<Utc>,
}

/// Insert model for submission records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmissionRow {
    /// Internal submission identifier.
    pub id: uuid::Uuid,
    /// Task the answers belong to.
    pub task_id: uuid::Uuid,
    /// Submitting user.
    pub user_id: uuid::Uuid,
    /// Essay answer JSON array.
    pub essay_answers: Value,
    /// Multiple-choice answer JSON array.
    pub choice_answers: Value,
    /// Aggregate score.
    pub score: Option<i64>,
    /// Submission instant.
    pub submitted_at: DateTime<Utc>,
}
