//! Auto-created problem groups and their broadcast chat.
//!
//! Groups are never created directly: task creation spawns one group per
//! problem item and links it back onto the item. Chat delivery is scoped
//! to group members and is transient, with no stored history. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
