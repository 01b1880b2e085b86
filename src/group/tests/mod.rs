//! Unit tests for the group module.
//!
//! Tests are organised by layer: domain invariants, chat orchestration
//! with a doubled channel port, the tokio broadcast adapter, and
//! persistence row conversion.

mod domain_tests;
