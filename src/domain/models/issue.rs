//! Issue and pull request domain models.
//!
//! GitHub serves issues and pull requests from the same endpoint. A record
//! with a `pull_request` marker is a pull request and must never be treated
//! as a plain issue.

use serde::{Deserialize, Serialize};

/// A label attached to an issue.
///
/// The REST API returns label objects, but callers (and older payloads) may
/// supply bare strings. Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// A bare label name.
    Name(String),
    /// A label object; only its `name` is kept.
    Object {
        /// The label name (e.g., "bug", "enhancement").
        name: String,
    },
}

impl Label {
    /// Returns the label name regardless of representation.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }

    /// Case-insensitive comparison against a label name.
    pub fn matches(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Marker present on pull requests, absent on plain issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestMarker {
    /// API URL of the pull request resource.
    #[serde(default)]
    pub url: Option<String>,
}

/// An issue or pull request within a single owner/repo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueOrPr {
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    /// Issue or pull request title.
    pub title: String,
    /// Labels applied to the record.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Present when this record is a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
    /// Global node id used by the GraphQL API.
    #[serde(default)]
    pub node_id: String,
}

impl IssueOrPr {
    /// Create a plain issue.
    pub fn issue(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            labels: Vec::new(),
            pull_request: None,
            node_id: format!("I_{number}"),
        }
    }

    /// Create a pull request record.
    pub fn pull_request(number: u64, title: impl Into<String>) -> Self {
        Self {
            pull_request: Some(PullRequestMarker::default()),
            node_id: format!("PR_{number}"),
            ..Self::issue(number, title)
        }
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Whether this record is a pull request.
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Whether any label matches `name`, ignoring case.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_deserialization_with_label_objects() {
        let json = r#"{
            "id": 1,
            "number": 42,
            "title": "Fix login bug",
            "node_id": "I_kwDOAbc",
            "state": "open",
            "labels": [
                { "id": 7, "name": "bug", "color": "d73a4a" },
                { "name": "priority: high", "color": "e4e669" }
            ],
            "pull_request": null
        }"#;
        let issue: IssueOrPr = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 42);
        assert_eq!(issue.node_id, "I_kwDOAbc");
        assert_eq!(issue.labels.len(), 2);
        assert_eq!(issue.labels[0].name(), "bug");
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_label_accepts_bare_strings() {
        let json = r#"{ "number": 3, "title": "t", "labels": ["Enhancement", { "name": "BUG" }] }"#;
        let issue: IssueOrPr = serde_json::from_str(json).unwrap();
        assert_eq!(issue.labels[0], Label::Name("Enhancement".to_string()));
        assert!(issue.has_label("enhancement"));
        assert!(issue.has_label("bug"));
        assert!(!issue.has_label("docs"));
    }

    #[test]
    fn test_pr_detection_via_pull_request_field() {
        let json = r#"{
            "number": 99,
            "title": "Add feature X",
            "node_id": "PR_kwDO",
            "pull_request": { "url": "https://api.github.com/repos/org/repo/pulls/99" }
        }"#;
        let pr: IssueOrPr = serde_json::from_str(json).unwrap();
        assert!(pr.is_pull_request());
    }

    #[test]
    fn test_builders() {
        let pr = IssueOrPr::pull_request(6, "feat").with_label("enhancement");
        assert!(pr.is_pull_request());
        assert!(pr.has_label("ENHANCEMENT"));
        assert!(!IssueOrPr::issue(5, "fix").is_pull_request());
    }
}
