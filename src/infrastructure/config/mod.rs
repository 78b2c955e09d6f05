//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - GitHub Actions runner fallbacks
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
