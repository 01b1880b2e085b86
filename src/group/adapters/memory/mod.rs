//! In-memory adapters for group persistence.

mod group;

pub use group::InMemoryGroupRepository;
