//! `PostgreSQL` adapters for submission persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSubmissionRepository, SubmissionPgPool};

#[cfg(test)]
pub(crate) use models::SubmissionRow;
#[cfg(test)]
pub(crate) use repository::{row_to_submission, to_new_row};
