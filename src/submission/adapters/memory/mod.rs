//! In-memory adapters for submission persistence.

mod submission;

pub use submission::InMemorySubmissionRepository;
