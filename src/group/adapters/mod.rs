//! Infrastructure adapters for the group context.

pub mod broadcast;
pub mod memory;
pub mod postgres;

pub use broadcast::BroadcastGroupChannel;
pub use memory::InMemoryGroupRepository;
pub use postgres::PostgresGroupRepository;
