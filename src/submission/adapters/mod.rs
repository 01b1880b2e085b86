//! Infrastructure adapters for the submission context.

pub mod memory;
pub mod postgres;

pub use memory::InMemorySubmissionRepository;
pub use postgres::PostgresSubmissionRepository;
