//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Level from config, overridable with `RUST_LOG`
//! - JSON or human-readable output on stderr

pub mod logger;

pub use logger::{parse_log_level, LogFormat, LoggerImpl};
