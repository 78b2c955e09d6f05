//! GitHub native adapter.
//!
//! Provides the REST and GraphQL transport behind the repository and
//! projects ports: commit ranges, issue lookups, releases, labels, pull
//! request linkage and Projects V2 field updates.

pub mod client;
pub mod models;
pub mod queries;

pub use client::GitHubClient;
