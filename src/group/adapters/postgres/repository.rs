//! `PostgreSQL` repository implementation for group storage.

use super::{
    models::{GroupRow, NewGroupRow},
    schema::groups,
};
use crate::group::{
    domain::{Group, GroupId, PersistedGroupData},
    ports::{GroupRepository, GroupRepositoryError, GroupRepositoryResult},
};
use crate::identity::domain::UserId;
use crate::task::domain::{ProblemItemId, TaskId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by group adapters.
pub type GroupPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed group repository.
#[derive(Debug, Clone)]
pub struct PostgresGroupRepository {
    pool: GroupPgPool,
}

impl PostgresGroupRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: GroupPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> GroupRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> GroupRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(GroupRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(GroupRepositoryError::persistence)?
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()> {
        let group_id = group.id();
        let new_row = to_new_row(group)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(groups::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        GroupRepositoryError::DuplicateGroup(group_id)
                    }
                    _ => GroupRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>> {
        self.run_blocking(move |connection| {
            let row = groups::table
                .filter(groups::id.eq(id.into_inner()))
                .select(GroupRow::as_select())
                .first::<GroupRow>(connection)
                .optional()
                .map_err(GroupRepositoryError::persistence)?;
            row.map(row_to_group).transpose()
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<Vec<Group>> {
        self.run_blocking(move |connection| {
            let rows = groups::table
                .filter(groups::task_id.eq(task_id.into_inner()))
                .order((groups::created_at.asc(), groups::id.asc()))
                .select(GroupRow::as_select())
                .load::<GroupRow>(connection)
                .map_err(GroupRepositoryError::persistence)?;
            rows.into_iter().map(row_to_group).collect()
        })
        .await
    }

    async fn delete_by_task(&self, task_id: TaskId) -> GroupRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(groups::table.filter(groups::task_id.eq(task_id.into_inner())))
                    .execute(connection)
                    .map_err(GroupRepositoryError::persistence)?;

            u64::try_from(deleted_count).map_err(GroupRepositoryError::persistence)
        })
        .await
    }
}

pub(crate) fn to_new_row(group: &Group) -> GroupRepositoryResult<NewGroupRow> {
    let members =
        serde_json::to_value(group.members()).map_err(GroupRepositoryError::persistence)?;

    Ok(NewGroupRow {
        id: group.id().into_inner(),
        name: group.name().to_owned(),
        members,
        task_id: group.task_id().into_inner(),
        problem_item_id: group.problem_item_id().map(ProblemItemId::into_inner),
        created_at: group.created_at(),
    })
}

pub(crate) fn row_to_group(row: GroupRow) -> GroupRepositoryResult<Group> {
    let GroupRow {
        id,
        name,
        members: persisted_members,
        task_id,
        problem_item_id,
        created_at,
    } = row;

    let members = serde_json::from_value::<Vec<UserId>>(persisted_members)
        .map_err(GroupRepositoryError::persistence)?;

    let data = PersistedGroupData {
        id: GroupId::from_uuid(id),
        name,
        members,
        task_id: TaskId::from_uuid(task_id),
        problem_item_id: problem_item_id.map(ProblemItemId::from_uuid),
        created_at,
    };
    Ok(Group::from_persisted(data))
}
