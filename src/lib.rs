//! relsync - GitHub release notes and project sync
//!
//! relsync composes release notes from the issues referenced between two
//! release tags and keeps issue metadata (labels, Projects V2 fields) in sync
//! with the release.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the GitHub port traits
//! - **Adapters** (`adapters`): REST/GraphQL client and an in-memory GitHub
//! - **Service Layer** (`services`): Range resolution, aggregation, notes and project sync
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use relsync::adapters::github::GitHubClient;
//! use relsync::services::{ReleaseRange, ReleaseService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Arc::new(GitHubClient::new("ghp_token", "octo-org", "widgets"));
//! let service = ReleaseService::new(client.clone(), client);
//! let notes = service
//!     .notes(&ReleaseRange::new("v1.0.0", "v1.1.0", "main"))
//!     .await?;
//! println!("{notes}");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::github::GitHubClient;
pub use domain::models::{Commit, Config, IssueOrPr, LoggingConfig, ProjectField};
pub use domain::ports::{ProjectsApi, RepositoryApi};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ReleaseService, render_release_notes};
