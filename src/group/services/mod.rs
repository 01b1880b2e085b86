//! Orchestration services for the group context.

mod chat;

pub use chat::{GroupChatError, GroupChatResult, GroupChatService, GroupRoster, PostedMessage};
