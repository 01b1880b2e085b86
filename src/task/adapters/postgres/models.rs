//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Optional long-form description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Priority level.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Current status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Category fixed at creation.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub category: String,
    /// Due date.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub due_date: DateTime<Utc>,
    /// Checklist JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub checklist: Value,
    /// Derived progress percentage.
    #[diesel(sql_type = diesel::sql_types::SmallInt)]
    pub progress: i16,
    /// Assignee JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub assignees: Value,
    /// Creating administrator.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub created_by: uuid::Uuid,
    /// Attachment JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub attachments: Value,
    /// Assessment JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub questions: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: String,
    /// Current status.
    pub status: String,
    /// Category fixed at creation.
    pub category: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Checklist JSON payload.
    pub checklist: Value,
    /// Derived progress percentage.
    pub progress: i16,
    /// Assignee JSON array.
    pub assignees: Value,
    /// Creating administrator.
    pub created_by: uuid::Uuid,
    /// Attachment JSON array.
    pub attachments: Value,
    /// Assessment JSON payload.
    pub questions: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// JSON shape of the `questions` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsPayload {
    /// Essay questions.
    pub essay: Vec<crate::task::domain::EssayQuestion>,
    /// Multiple-choice questions.
    pub multiple_choice: Vec<crate::task::domain::MultipleChoiceQuestion>,
    /// Problem sub-items.
    pub problems: Vec<crate::task::domain::ProblemItem>,
}

/// Aggregate row returned by raw count queries.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    /// Number of matching rows.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

/// Aggregate row returned by grouped histogram queries.
#[derive(Debug, QueryableByName)]
pub struct HistogramRow {
    /// Grouping label value.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub label: String,
    /// Number of rows under the label.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

/// Projection row for dashboard digest queries.
#[derive(Debug, QueryableByName)]
pub struct DigestRow {
    /// Internal task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Category fixed at creation.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub category: String,
    /// Current status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Priority level.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Due date.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub due_date: DateTime<Utc>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}
