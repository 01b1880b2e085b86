//! Port contracts for group persistence and chat fan-out.

pub mod channel;
pub mod repository;

pub use channel::{GroupChannel, GroupChannelError, GroupChannelResult};
pub use repository::{GroupRepository, GroupRepositoryError, GroupRepositoryResult};
