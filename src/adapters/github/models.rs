//! GitHub REST and GraphQL wire models.
//!
//! These structs map to the JSON payloads of the GitHub REST API v3 and the
//! GraphQL API. They are used internally by the GitHub adapter and are
//! converted into domain models before leaving it.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Commit, FieldOption, IterationConfiguration, ProjectField};

// ---------------------------------------------------------------------------
// REST
// ---------------------------------------------------------------------------

/// A commit as returned by the commits and compare endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RestCommit {
    /// Full commit SHA.
    pub sha: String,
    /// Git-level commit data.
    pub commit: RestCommitDetail,
}

/// Nested `commit` object of a [`RestCommit`].
#[derive(Debug, Clone, Deserialize)]
pub struct RestCommitDetail {
    /// Full commit message.
    #[serde(default)]
    pub message: String,
}

impl From<RestCommit> for Commit {
    fn from(value: RestCommit) -> Self {
        Self::new(value.sha, value.commit.message)
    }
}

/// Response of `GET /repos/{owner}/{repo}/compare/{basehead}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RestComparison {
    /// Commits between base and head, oldest first, base excluded.
    #[serde(default)]
    pub commits: Vec<RestCommit>,
}

/// Response of `GET /repos/{owner}/{repo}` (only the owner is read).
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepository {
    /// Repository owner.
    pub owner: RestOwner,
}

/// Owner object embedded in a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RestOwner {
    /// Owner login.
    pub login: String,
    /// `"Organization"` or `"User"`.
    #[serde(rename = "type")]
    pub owner_type: String,
}

/// Request body for `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseRequest<'a> {
    /// Existing tag to publish.
    pub tag_name: &'a str,
    /// Release title.
    pub name: &'a str,
    /// Markdown body.
    pub body: &'a str,
    /// Pre-release flag.
    pub prerelease: bool,
}

/// Request body for `POST /repos/{owner}/{repo}/issues/{number}/labels`.
#[derive(Debug, Clone, Serialize)]
pub struct AddLabelsRequest<'a> {
    /// Labels to add; existing labels are kept.
    pub labels: Vec<&'a str>,
}

// ---------------------------------------------------------------------------
// GraphQL envelopes
// ---------------------------------------------------------------------------

/// Request body of every GraphQL call.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    /// Query or mutation document.
    pub query: &'a str,
    /// Variables referenced by the document.
    pub variables: serde_json::Value,
}

/// Response envelope of every GraphQL call.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Present when at least part of the query resolved.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Present when any part of the query failed.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// A single GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message.
    pub message: String,
}

/// `{ nodes: [...] }` connection shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    /// Connection nodes; null entries are dropped.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

/// A node carrying only an id.
#[derive(Debug, Clone, Deserialize)]
pub struct IdNode {
    /// Global node id.
    pub id: String,
}

// ---------------------------------------------------------------------------
// GraphQL payloads
// ---------------------------------------------------------------------------

/// `repository.pullRequest.closingIssuesReferences` result.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosingIssuesData {
    /// Null when the repository is not visible.
    pub repository: Option<ClosingIssuesRepository>,
}

/// Repository level of [`ClosingIssuesData`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingIssuesRepository {
    /// Null when the number is not a pull request.
    pub pull_request: Option<ClosingIssuesPullRequest>,
}

/// Pull request level of [`ClosingIssuesData`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingIssuesPullRequest {
    /// Linked issues that close on merge.
    pub closing_issues_references: Connection<NumberNode>,
}

/// A node carrying only an issue number.
#[derive(Debug, Clone, Deserialize)]
pub struct NumberNode {
    /// Issue number.
    pub number: i64,
}

/// Result of the project-id query for either owner kind.
///
/// Only the root field matching the queried owner kind is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectIdData {
    /// Populated by the organization query.
    #[serde(default)]
    pub organization: Option<ProjectOwnerNode>,
    /// Populated by the user query.
    #[serde(default)]
    pub user: Option<ProjectOwnerNode>,
}

/// Owner level of [`ProjectIdData`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectOwnerNode {
    /// Null when no project with that number exists.
    #[serde(rename = "projectV2")]
    pub project_v2: Option<IdNode>,
}

/// Result of the project-fields query.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFieldsData {
    /// Null when the id does not resolve to a node.
    pub node: Option<ProjectFieldsNode>,
}

/// Project level of [`ProjectFieldsData`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFieldsNode {
    /// Absent when the node is not a `ProjectV2`.
    #[serde(default)]
    pub fields: Option<Connection<RawProjectField>>,
}

/// A field node as returned through the type-specific fragments.
///
/// Every member is optional because a node matching none of the fragments
/// arrives as an empty object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProjectField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default)]
    pub configuration: Option<IterationConfiguration>,
}

impl RawProjectField {
    /// Convert into a domain field, dropping nodes without identity.
    pub fn into_field(self) -> Option<ProjectField> {
        Some(ProjectField {
            id: self.id?,
            name: self.name?,
            data_type: self.data_type?.into(),
            options: self.options,
            configuration: self.configuration,
        })
    }
}

/// Result of `addProjectV2ItemById`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub add_item: AddItemPayload,
}

/// Payload of [`AddItemData`].
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemPayload {
    /// The created (or existing) project item.
    pub item: IdNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_commit_conversion() {
        let json = r#"{
            "sha": "abc123",
            "commit": { "message": "fix: patch (#5)", "author": { "name": "dev" } },
            "html_url": "https://github.com/org/repo/commit/abc123"
        }"#;
        let rest: RestCommit = serde_json::from_str(json).unwrap();
        let commit: Commit = rest.into();
        assert_eq!(commit.sha, "abc123");
        assert_eq!(commit.message, "fix: patch (#5)");
    }

    #[test]
    fn test_repository_owner_type() {
        let json = r#"{ "id": 1, "owner": { "login": "my-org", "type": "Organization" } }"#;
        let repo: RestRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.owner.owner_type, "Organization");
    }

    #[test]
    fn test_graphql_errors_envelope() {
        let json = r#"{
            "data": { "repository": { "pullRequest": null } },
            "errors": [ { "type": "NOT_FOUND", "message": "Could not resolve to a PullRequest" } ]
        }"#;
        let resp: GraphQlResponse<ClosingIssuesData> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.errors.unwrap().len(), 1);
        assert!(resp.data.unwrap().repository.unwrap().pull_request.is_none());
    }

    #[test]
    fn test_closing_issues_payload() {
        let json = r#"{
            "repository": {
                "pullRequest": {
                    "closingIssuesReferences": { "nodes": [ { "number": 7 }, null, { "number": 9 } ] }
                }
            }
        }"#;
        let data: ClosingIssuesData = serde_json::from_str(json).unwrap();
        let nodes = data.repository.unwrap().pull_request.unwrap().closing_issues_references.nodes;
        let numbers: Vec<i64> = nodes.into_iter().flatten().map(|n| n.number).collect();
        assert_eq!(numbers, vec![7, 9]);
    }

    #[test]
    fn test_raw_field_without_identity_is_dropped() {
        let json = r#"{ "node": { "fields": { "nodes": [
            {},
            { "id": "PVTF_1", "name": "Title", "dataType": "TITLE" }
        ] } } }"#;
        let data: ProjectFieldsData = serde_json::from_str(json).unwrap();
        let fields: Vec<ProjectField> = data
            .node
            .unwrap()
            .fields
            .unwrap()
            .nodes
            .into_iter()
            .flatten()
            .filter_map(RawProjectField::into_field)
            .collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "Title");
    }

    #[test]
    fn test_add_item_payload() {
        let json = r#"{ "addProjectV2ItemById": { "item": { "id": "PVTI_1" } } }"#;
        let data: AddItemData = serde_json::from_str(json).unwrap();
        assert_eq!(data.add_item.item.id, "PVTI_1");
    }
}
