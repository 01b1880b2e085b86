//! Error types for group domain validation.

use thiserror::Error;

/// Errors returned while constructing domain group values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GroupDomainError {
    /// The group name is empty after trimming.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// The chat message body is empty after trimming.
    #[error("message body must not be empty")]
    EmptyMessageBody,
}
