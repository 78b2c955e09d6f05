//! Domain models for releases, issues and project boards.

pub mod commit;
pub mod config;
pub mod issue;
pub mod project;
pub mod release;

pub use commit::Commit;
pub use config::{Config, GitHubConfig, LoggingConfig, RateLimitConfig, ReleaseConfig};
pub use issue::{IssueOrPr, Label, PullRequestMarker};
pub use project::{
    FieldDataType, FieldOption, FieldValueInput, Iteration, IterationConfiguration,
    MutationKey, OwnerKind, ProjectField,
};
pub use release::NewRelease;
