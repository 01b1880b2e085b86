//! Unit tests for the submission module.
//!
//! Tests are organised by layer: scoring invariants on the aggregate,
//! hand-in flows through the in-memory adapters, and persistence row
//! conversion.
