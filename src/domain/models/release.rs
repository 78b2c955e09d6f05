//! Release domain model.

use serde::{Deserialize, Serialize};

/// A release to publish for an existing tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    /// Tag the release points at.
    pub tag_name: String,
    /// Release title.
    pub name: String,
    /// Markdown release notes.
    pub body: String,
    /// Whether the release is marked as a pre-release.
    pub prerelease: bool,
}
