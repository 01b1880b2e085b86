//! Service layer for group chat and membership queries.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::group::{
    domain::{ChatMessage, Group, GroupDomainError, GroupId},
    ports::{GroupChannel, GroupChannelError, GroupRepository, GroupRepositoryError},
};
use crate::identity::{
    domain::{Actor, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::policy::{self, AccessDenied};

/// A message accepted for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// The broadcast message.
    pub message: ChatMessage,
    /// Number of live subscribers the message reached.
    pub delivered: usize,
}

/// A group together with the resolved profiles of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRoster {
    /// The group itself.
    pub group: Group,
    /// Profiles for members known to the directory, in member order.
    pub members: Vec<UserProfile>,
}

/// Service-level errors for group chat operations.
#[derive(Debug, Error)]
pub enum GroupChatError {
    /// Message validation failed.
    #[error(transparent)]
    Domain(#[from] GroupDomainError),

    /// The group does not exist.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// The actor may not act on this group.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Group lookup failed.
    #[error("group repository error: {0}")]
    Groups(#[from] GroupRepositoryError),

    /// Broadcast delivery failed.
    #[error("chat channel error: {0}")]
    Channel(#[from] GroupChannelError),

    /// Member profile lookup failed.
    #[error("user directory error: {0}")]
    Directory(#[from] UserDirectoryError),
}

/// Result type for group chat service operations.
pub type GroupChatResult<T> = Result<T, GroupChatError>;

/// Group chat orchestration service.
#[derive(Clone)]
pub struct GroupChatService<G, X, D, C>
where
    G: GroupRepository,
    X: GroupChannel,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    groups: Arc<G>,
    channel: Arc<X>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<G, X, D, C> GroupChatService<G, X, D, C>
where
    G: GroupRepository,
    X: GroupChannel,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new group chat service.
    #[must_use]
    pub const fn new(groups: Arc<G>, channel: Arc<X>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            groups,
            channel,
            directory,
            clock,
        }
    }

    /// Posts a message to a group's broadcast channel.
    ///
    /// Members and administrators may post. Delivery is best-effort: the
    /// returned count is zero when nobody is subscribed.
    ///
    /// # Errors
    ///
    /// Returns [`GroupChatError::GroupNotFound`] when the group does not
    /// exist, [`GroupChatError::Forbidden`] when the actor is outside the
    /// group, and [`GroupChatError::Domain`] for an empty message body.
    pub async fn post_message(
        &self,
        actor: &Actor,
        group_id: GroupId,
        body: impl Into<String> + Send,
    ) -> GroupChatResult<PostedMessage> {
        let group = self.require_group(group_id).await?;
        policy::require_group_member(actor, &group)?;

        let message = ChatMessage::new(group_id, actor.id(), body, &*self.clock)?;
        let delivered = self.channel.publish(&message).await?;
        Ok(PostedMessage { message, delivered })
    }

    /// Returns a group together with its member profiles.
    ///
    /// Profiles keep member order; users unknown to the directory are
    /// skipped rather than failing the whole roster.
    ///
    /// # Errors
    ///
    /// Returns [`GroupChatError::GroupNotFound`] when the group does not
    /// exist and [`GroupChatError::Forbidden`] when the actor is outside
    /// the group.
    pub async fn group_members(
        &self,
        actor: &Actor,
        group_id: GroupId,
    ) -> GroupChatResult<GroupRoster> {
        let group = self.require_group(group_id).await?;
        policy::require_group_member(actor, &group)?;

        let members = self.directory.find_many(group.members()).await?;
        Ok(GroupRoster { group, members })
    }

    async fn require_group(&self, group_id: GroupId) -> GroupChatResult<Group> {
        self.groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupChatError::GroupNotFound(group_id))
    }
}
