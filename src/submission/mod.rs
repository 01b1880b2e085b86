//! Assessment submissions and their scoring.
//!
//! Pretest and posttest tasks accept exactly one submission per user.
//! Administrators mark essay answers after the fact or overwrite a
//! submission's aggregate score outright. The module follows hexagonal
//! architecture:
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
