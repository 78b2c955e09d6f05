//! Port trait definitions (Hexagonal Architecture)
//!
//! The resolution engines talk to the hosting platform only through these
//! traits:
//! - RepositoryApi: REST operations on commits, issues, releases and labels
//! - ProjectsApi: GraphQL queries and mutations for linkage and project boards

pub mod github;

pub use github::{ProjectsApi, RepositoryApi};
