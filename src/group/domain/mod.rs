//! Domain model for problem collaboration groups and their chat messages.

mod error;
mod group;
mod ids;
mod message;

pub use error::GroupDomainError;
pub use group::{Group, PersistedGroupData};
pub use ids::{GroupId, MessageId};
pub use message::ChatMessage;
