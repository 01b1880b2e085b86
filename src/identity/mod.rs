//! Caller identity and user directory lookups.
//!
//! Authentication and credential handling live outside the engine. This
//! module models the resolved result (a [`domain::Actor`] with a role) and
//! the directory port used to populate assignee and member summaries. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
