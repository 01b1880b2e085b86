//! Port contracts for identity lookups.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
