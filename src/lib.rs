//! Comenius: learning-management task engine.
//!
//! This crate provides the core functionality for running classroom task
//! workflows: checklist-driven task tracking, pretest/posttest submissions
//! with scoring, automatically provisioned problem groups with broadcast
//! chat, and dashboard aggregation.
//!
//! # Architecture
//!
//! Comenius follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, channels)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, checklist progress, and dashboards
//! - [`submission`]: Assessment hand-in and scoring
//! - [`group`]: Auto-created problem groups and broadcast chat
//! - [`identity`]: Caller identity and user directory lookups
//! - [`policy`]: Central access-control decisions

pub mod group;
pub mod identity;
pub mod policy;
pub mod submission;
pub mod task;
