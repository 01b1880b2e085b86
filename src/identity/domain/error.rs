//! Error types for identity domain parsing.

use thiserror::Error;

/// Error returned while parsing roles from persistence or wire input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
