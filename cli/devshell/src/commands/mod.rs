//! CLI command implementations.

pub mod doctor;
pub mod start;
pub mod targets;
