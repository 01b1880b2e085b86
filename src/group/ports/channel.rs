//! Broadcast channel port for group chat delivery.

use crate::group::domain::ChatMessage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for group channel operations.
pub type GroupChannelResult<T> = Result<T, GroupChannelError>;

/// At-most-once, best-effort fan-out contract for chat messages.
///
/// Implementations deliver to current subscribers only: there is no
/// durability, no replay, and a publish with zero subscribers succeeds.
#[async_trait]
pub trait GroupChannel: Send + Sync {
    /// Publishes a message to its group's channel.
    ///
    /// Returns the number of subscribers the message was handed to.
    async fn publish(&self, message: &ChatMessage) -> GroupChannelResult<usize>;
}

/// Errors returned by group channel implementations.
#[derive(Debug, Clone, Error)]
pub enum GroupChannelError {
    /// Channel infrastructure failure.
    #[error("channel failure: {0}")]
    Channel(Arc<dyn std::error::Error + Send + Sync>),
}

impl GroupChannelError {
    /// Wraps a channel error.
    pub fn channel(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Channel(Arc::new(err))
    }
}
