//! Directory port for resolving user summaries.

use crate::identity::domain::{UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only lookup contract against the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a single user summary.
    ///
    /// Returns `None` when the directory does not know the identifier.
    async fn find(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;

    /// Finds summaries for the given identifiers, preserving input order.
    ///
    /// Identifiers unknown to the directory are silently skipped, so the
    /// result may be shorter than the input.
    async fn find_many(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Directory lookup failure.
    #[error("directory lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
