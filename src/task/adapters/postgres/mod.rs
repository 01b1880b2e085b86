//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};

#[cfg(test)]
pub(crate) use models::{DigestRow, QuestionsPayload, TaskRow};
#[cfg(test)]
pub(crate) use repository::{digest_from_row, row_to_task, to_new_row};
