//! Commit domain model.

use serde::{Deserialize, Serialize};

/// A commit as seen by the release range resolver.
///
/// Only the fields the reference extractor needs are kept: the SHA used as
/// the comparison base and the full message scanned for `#N` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full 40-character commit SHA.
    pub sha: String,
    /// Full commit message, including the body.
    pub message: String,
}

impl Commit {
    /// Create a new commit.
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }
}
