//! Port contracts for submission persistence.

pub mod repository;

pub use repository::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult};
