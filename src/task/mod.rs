//! Task management for Comenius.
//!
//! This module covers the administrative task lifecycle: creating tasks with
//! checklists, assessment questions, and problem sub-items, deriving progress
//! from checklist completion, filtered listing with status summaries, and the
//! dashboard aggregates. Creating a problem task provisions one collaboration
//! group per sub-item through the group context. The module follows
//! hexagonal architecture:
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
