//! `PostgreSQL` adapters for group persistence.

mod models;
mod repository;
mod schema;

pub use repository::{GroupPgPool, PostgresGroupRepository};

#[cfg(test)]
pub(crate) use models::GroupRow;
#[cfg(test)]
pub(crate) use repository::{row_to_group, to_new_row};
