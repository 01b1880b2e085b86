//! Infrastructure adapters for the task context.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
