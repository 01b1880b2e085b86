//! `PostgreSQL` repository implementation for task storage and dashboard
//! aggregation.

use super::{
    models::{CountRow, DigestRow, HistogramRow, NewTaskRow, QuestionsPayload, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        ChecklistItem, PersistedTaskData, Progress, Task, TaskCategory, TaskDigest, TaskId,
        TaskPriority, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::title.eq(&row.title),
                        tasks::description.eq(&row.description),
                        tasks::priority.eq(&row.priority),
                        tasks::status.eq(&row.status),
                        tasks::category.eq(&row.category),
                        tasks::due_date.eq(row.due_date),
                        tasks::checklist.eq(&row.checklist),
                        tasks::progress.eq(row.progress),
                        tasks::assignees.eq(&row.assignees),
                        tasks::attachments.eq(&row.attachments),
                        tasks::questions.eq(&row.questions),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }

            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }

            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let binds = filter_binds(filter)?;
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT id, title, description, priority, status, category, due_date, ",
                "checklist, progress, assignees, created_by, attachments, questions, ",
                "created_at, updated_at FROM tasks ",
                "WHERE ($1::jsonb IS NULL OR assignees @> $1::jsonb) ",
                "AND ($2::text IS NULL OR status = $2) ",
                "AND ($3::text IS NULL OR status <> $3) ",
                "AND ($4::text IS NULL OR category = $4) ",
                "AND ($5::timestamptz IS NULL OR due_date < $5) ",
                "ORDER BY created_at DESC, id DESC",
            ))
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Jsonb>, _>(binds.assignees)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.status)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.status_not)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.category)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>, _>(
                binds.due_before,
            )
            .load::<TaskRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let binds = filter_binds(filter)?;
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(concat!(
                "SELECT COUNT(*) AS count FROM tasks ",
                "WHERE ($1::jsonb IS NULL OR assignees @> $1::jsonb) ",
                "AND ($2::text IS NULL OR status = $2) ",
                "AND ($3::text IS NULL OR status <> $3) ",
                "AND ($4::text IS NULL OR category = $4) ",
                "AND ($5::timestamptz IS NULL OR due_date < $5)",
            ))
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Jsonb>, _>(binds.assignees)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.status)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.status_not)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(binds.category)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>, _>(
                binds.due_before,
            )
            .get_result::<CountRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            u64::try_from(row.count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn status_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskStatus, u64)>> {
        let assignees = scope_assignee_bind(scope)?;
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT status AS label, COUNT(*) AS count FROM tasks ",
                "WHERE ($1::jsonb IS NULL OR assignees @> $1::jsonb) ",
                "GROUP BY status",
            ))
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Jsonb>, _>(assignees)
            .load::<HistogramRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            rows.into_iter()
                .map(|row| {
                    let status = TaskStatus::try_from(row.label.as_str())
                        .map_err(TaskRepositoryError::persistence)?;
                    let count =
                        u64::try_from(row.count).map_err(TaskRepositoryError::persistence)?;
                    Ok((status, count))
                })
                .collect()
        })
        .await
    }

    async fn priority_histogram(
        &self,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<(TaskPriority, u64)>> {
        let assignees = scope_assignee_bind(scope)?;
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT priority AS label, COUNT(*) AS count FROM tasks ",
                "WHERE ($1::jsonb IS NULL OR assignees @> $1::jsonb) ",
                "GROUP BY priority",
            ))
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Jsonb>, _>(assignees)
            .load::<HistogramRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            rows.into_iter()
                .map(|row| {
                    let priority = TaskPriority::try_from(row.label.as_str())
                        .map_err(TaskRepositoryError::persistence)?;
                    let count =
                        u64::try_from(row.count).map_err(TaskRepositoryError::persistence)?;
                    Ok((priority, count))
                })
                .collect()
        })
        .await
    }

    async fn recent(&self, scope: TaskScope, limit: u32) -> TaskRepositoryResult<Vec<TaskDigest>> {
        let assignees = scope_assignee_bind(scope)?;
        let row_limit = i64::from(limit);
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT id, title, category, status, priority, due_date, created_at ",
                "FROM tasks ",
                "WHERE ($1::jsonb IS NULL OR assignees @> $1::jsonb) ",
                "ORDER BY created_at DESC, id DESC ",
                "LIMIT $2",
            ))
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Jsonb>, _>(assignees)
            .bind::<diesel::sql_types::BigInt, _>(row_limit)
            .load::<DigestRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            rows.into_iter().map(digest_from_row).collect()
        })
        .await
    }
}

struct FilterBinds {
    assignees: Option<Value>,
    status: Option<&'static str>,
    status_not: Option<&'static str>,
    category: Option<&'static str>,
    due_before: Option<DateTime<Utc>>,
}

fn filter_binds(filter: &TaskFilter) -> TaskRepositoryResult<FilterBinds> {
    Ok(FilterBinds {
        assignees: scope_assignee_bind(filter.scope())?,
        status: filter.status().map(TaskStatus::as_str),
        status_not: filter.status_not().map(TaskStatus::as_str),
        category: filter.category().map(TaskCategory::as_str),
        due_before: filter.due_before(),
    })
}

fn scope_assignee_bind(scope: TaskScope) -> TaskRepositoryResult<Option<Value>> {
    match scope {
        TaskScope::All => Ok(None),
        TaskScope::AssignedTo(user) => serde_json::to_value([user])
            .map(Some)
            .map_err(TaskRepositoryError::persistence),
    }
}

pub(crate) fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let checklist =
        serde_json::to_value(task.checklist()).map_err(TaskRepositoryError::persistence)?;
    let assignees =
        serde_json::to_value(task.assignees()).map_err(TaskRepositoryError::persistence)?;
    let attachments =
        serde_json::to_value(task.attachments()).map_err(TaskRepositoryError::persistence)?;
    let questions = serde_json::to_value(QuestionsPayload {
        essay: task.essay_questions().to_vec(),
        multiple_choice: task.choice_questions().to_vec(),
        problems: task.problem_items().to_vec(),
    })
    .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        category: task.category().as_str().to_owned(),
        due_date: task.due_date(),
        checklist,
        progress: i16::from(task.progress().percent()),
        assignees,
        created_by: task.created_by().into_inner(),
        attachments,
        questions,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        category: persisted_category,
        due_date,
        checklist: persisted_checklist,
        progress: persisted_progress,
        assignees: persisted_assignees,
        created_by,
        attachments: persisted_attachments,
        questions: persisted_questions,
        created_at,
        updated_at,
    } = row;

    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let category = TaskCategory::try_from(persisted_category.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let checklist = serde_json::from_value::<Vec<ChecklistItem>>(persisted_checklist)
        .map_err(TaskRepositoryError::persistence)?;
    let progress_percent =
        u8::try_from(persisted_progress).map_err(TaskRepositoryError::persistence)?;
    let progress =
        Progress::try_from(progress_percent).map_err(TaskRepositoryError::persistence)?;
    let assignees = serde_json::from_value::<Vec<UserId>>(persisted_assignees)
        .map_err(TaskRepositoryError::persistence)?;
    let attachments = serde_json::from_value::<Vec<String>>(persisted_attachments)
        .map_err(TaskRepositoryError::persistence)?;
    let questions = serde_json::from_value::<QuestionsPayload>(persisted_questions)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        priority,
        status,
        category,
        due_date,
        checklist,
        progress,
        assignees,
        created_by: UserId::from_uuid(created_by),
        attachments,
        essay_questions: questions.essay,
        choice_questions: questions.multiple_choice,
        problem_items: questions.problems,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

pub(crate) fn digest_from_row(row: DigestRow) -> TaskRepositoryResult<TaskDigest> {
    let DigestRow {
        id,
        title,
        category: persisted_category,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        created_at,
    } = row;

    let category = TaskCategory::try_from(persisted_category.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskDigest {
        id: TaskId::from_uuid(id),
        title,
        category,
        status,
        priority,
        due_date,
        created_at,
    })
}
