//! Diesel row models for group persistence.

use super::schema::groups;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for group records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GroupRow {
    /// Internal group identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Display name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Member JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub members: Value,
    /// Owning task.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub task_id: uuid::Uuid,
    /// Linked problem sub-item, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub problem_item_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for group records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = groups)]
pub struct NewGroupRow {
    /// Internal group identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Member JSON array.
    pub members: Value,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Linked problem sub-item, if any.
    pub problem_item_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
