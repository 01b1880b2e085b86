//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain invariants, workflow orchestration
//! through the in-memory adapters, dashboard aggregation, and persistence
//! row conversion.

mod dashboard_tests;
