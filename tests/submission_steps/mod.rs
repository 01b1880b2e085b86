//! Step definitions for assessment hand-in BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
