//! `PostgreSQL` repository implementation for submission storage.

use super::{
    models::{NewSubmissionRow, SubmissionRow},
    schema::submissions,
};
use crate::identity::domain::UserId;
use crate::submission::{
    domain::{ChoiceAnswer, EssayAnswer, PersistedSubmissionData, Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by submission adapters.
pub type SubmissionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed submission repository.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionRepository {
    pool: SubmissionPgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SubmissionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SubmissionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SubmissionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SubmissionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SubmissionRepositoryError::persistence)?
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn store(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let task_id = submission.task_id();
        let user_id = submission.user_id();
        let new_row = to_new_row(submission)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(submissions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_task_user_unique_violation(info.as_ref()) =>
                    {
                        SubmissionRepositoryError::DuplicateSubmission { task_id, user_id }
                    }
                    _ => SubmissionRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn update(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let submission_id = submission.id();
        let row = to_new_row(submission)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                submissions::table.filter(submissions::id.eq(submission_id.into_inner())),
            )
            .set((
                submissions::essay_answers.eq(&row.essay_answers),
                submissions::score.eq(row.score),
            ))
            .execute(connection)
            .map_err(SubmissionRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(SubmissionRepositoryError::NotFound(submission_id));
            }

            Ok(())
        })
        .await
    }

    async fn find_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Option<Submission>> {
        self.run_blocking(move |connection| {
            let row = submissions::table
                .filter(submissions::task_id.eq(task_id.into_inner()))
                .filter(submissions::user_id.eq(user_id.into_inner()))
                .select(SubmissionRow::as_select())
                .first::<SubmissionRow>(connection)
                .optional()
                .map_err(SubmissionRepositoryError::persistence)?;
            row.map(row_to_submission).transpose()
        })
        .await
    }

    async fn find_by_user(&self, user_id: UserId) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.run_blocking(move |connection| {
            let rows = submissions::table
                .filter(submissions::user_id.eq(user_id.into_inner()))
                .order((submissions::submitted_at.desc(), submissions::id.desc()))
                .select(SubmissionRow::as_select())
                .load::<SubmissionRow>(connection)
                .map_err(SubmissionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_submission).collect()
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.run_blocking(move |connection| {
            let rows = submissions::table
                .filter(submissions::task_id.eq(task_id.into_inner()))
                .order((submissions::submitted_at.desc(), submissions::id.desc()))
                .select(SubmissionRow::as_select())
                .load::<SubmissionRow>(connection)
                .map_err(SubmissionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_submission).collect()
        })
        .await
    }

    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.run_blocking(move |connection| {
            let rows = submissions::table
                .order((submissions::submitted_at.desc(), submissions::id.desc()))
                .select(SubmissionRow::as_select())
                .load::<SubmissionRow>(connection)
                .map_err(SubmissionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_submission).collect()
        })
        .await
    }

    async fn delete_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(
                submissions::table.filter(submissions::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(SubmissionRepositoryError::persistence)?;

            u64::try_from(deleted_count).map_err(SubmissionRepositoryError::persistence)
        })
        .await
    }
}

fn is_task_user_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_submissions_task_user_unique")
}

pub(crate) fn to_new_row(submission: &Submission) -> SubmissionRepositoryResult<NewSubmissionRow> {
    let essay_answers = serde_json::to_value(submission.essay_answers())
        .map_err(SubmissionRepositoryError::persistence)?;
    let choice_answers = serde_json::to_value(submission.choice_answers())
        .map_err(SubmissionRepositoryError::persistence)?;

    Ok(NewSubmissionRow {
        id: submission.id().into_inner(),
        task_id: submission.task_id().into_inner(),
        user_id: submission.user_id().into_inner(),
        essay_answers,
        choice_answers,
        score: submission.score().map(i64::from),
        submitted_at: submission.submitted_at(),
    })
}

pub(crate) fn row_to_submission(row: SubmissionRow) -> SubmissionRepositoryResult<Submission> {
    let SubmissionRow {
        id,
        task_id,
        user_id,
        essay_answers: persisted_essay_answers,
        choice_answers: persisted_choice_answers,
        score: persisted_score,
        submitted_at,
    } = row;

    let essay_answers = serde_json::from_value::<Vec<EssayAnswer>>(persisted_essay_answers)
        .map_err(SubmissionRepositoryError::persistence)?;
    let choice_answers = serde_json::from_value::<Vec<ChoiceAnswer>>(persisted_choice_answers)
        .map_err(SubmissionRepositoryError::persistence)?;
    let score = persisted_score
        .map(u32::try_from)
        .transpose()
        .map_err(SubmissionRepositoryError::persistence)?;

    let data = PersistedSubmissionData {
        id: SubmissionId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        user_id: UserId::from_uuid(user_id),
        essay_answers,
        choice_answers,
        score,
        submitted_at,
    };
    Ok(Submission::from_persisted(data))
}
