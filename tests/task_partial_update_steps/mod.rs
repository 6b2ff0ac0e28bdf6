//! Step definitions for partial update BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
