//! Step definitions for checklist progress BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
