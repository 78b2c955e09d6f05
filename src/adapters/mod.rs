//! Infrastructure adapters for external systems.

pub mod github;
pub mod memory;
