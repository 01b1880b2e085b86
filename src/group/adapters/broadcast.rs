//! Tokio broadcast fan-out for group chat messages.
//!
//! Each group gets its own broadcast channel, created lazily on first
//! subscribe or publish. Delivery is best-effort: slow subscribers drop
//! messages once the channel buffer wraps, and a publish with no
//! subscribers succeeds with a delivery count of zero.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::group::{
    domain::{ChatMessage, GroupId},
    ports::{GroupChannel, GroupChannelError, GroupChannelResult},
};

/// Buffered messages per group before slow subscribers start lagging.
const DEFAULT_CAPACITY: usize = 256;

type SenderMap = HashMap<GroupId, broadcast::Sender<ChatMessage>>;

/// Broadcast-backed [`GroupChannel`] implementation.
#[derive(Debug, Clone)]
pub struct BroadcastGroupChannel {
    capacity: usize,
    senders: Arc<RwLock<SenderMap>>,
}

impl Default for BroadcastGroupChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastGroupChannel {
    /// Creates a channel registry with the default per-group buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a channel registry with an explicit per-group buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            senders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribes to a group's message stream.
    ///
    /// The group's channel is created on demand, so subscribing before
    /// the first publish is safe.
    ///
    /// # Errors
    ///
    /// Returns [`GroupChannelError::Channel`] when the sender registry
    /// lock is poisoned.
    pub fn subscribe(
        &self,
        group_id: GroupId,
    ) -> GroupChannelResult<broadcast::Receiver<ChatMessage>> {
        let mut senders = self
            .senders
            .write()
            .map_err(|err| GroupChannelError::channel(std::io::Error::other(err.to_string())))?;
        let sender = senders
            .entry(group_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(sender.subscribe())
    }
}

#[async_trait]
impl GroupChannel for BroadcastGroupChannel {
    async fn publish(&self, message: &ChatMessage) -> GroupChannelResult<usize> {
        let senders = self
            .senders
            .read()
            .map_err(|err| GroupChannelError::channel(std::io::Error::other(err.to_string())))?;
        let Some(sender) = senders.get(&message.group_id()) else {
            return Ok(0);
        };
        // A send error only means every receiver has gone away.
        Ok(sender.send(message.clone()).unwrap_or(0))
    }
}
