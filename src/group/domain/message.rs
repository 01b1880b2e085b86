//! Broadcast-only chat messages.

use super::{GroupDomainError, GroupId, MessageId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A chat message published to a group channel.
///
/// Messages are never persisted: delivery is best-effort to the channel's
/// current subscribers and anything sent while disconnected is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    group_id: GroupId,
    sender: UserId,
    body: String,
    sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::EmptyMessageBody`] when the body is empty
    /// after trimming.
    pub fn new(
        group_id: GroupId,
        sender: UserId,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, GroupDomainError> {
        let text = body.into();
        if text.trim().is_empty() {
            return Err(GroupDomainError::EmptyMessageBody);
        }
        Ok(Self {
            id: MessageId::new(),
            group_id,
            sender,
            body: text,
            sent_at: clock.utc(),
        })
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the destination group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the sending user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}
