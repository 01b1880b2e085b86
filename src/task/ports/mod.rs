//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope,
};
