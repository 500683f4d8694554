//! Core data model: script identity, run actions, and execution plans.

pub mod plan;
pub mod script;
pub mod types;
