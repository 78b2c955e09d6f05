//! GitHub port traits.
//!
//! These define the operations the release and project-sync engines consume.
//! The engines never see HTTP, GraphQL documents or wire payloads; adapters
//! translate between the host API and the domain models.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Commit, FieldValueInput, IssueOrPr, NewRelease, OwnerKind, ProjectField,
};

/// Port for REST-style operations scoped to a single owner/repo.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Login of the repository owner.
    fn owner(&self) -> &str;

    /// Repository name.
    fn repo(&self) -> &str;

    /// Resolve a ref (tag, branch or SHA) to a commit.
    async fn get_commit(&self, reference: &str) -> DomainResult<Commit>;

    /// List a single page (up to 100) of commits on `branch`, newest first.
    async fn list_commits(&self, branch: &str) -> DomainResult<Vec<Commit>>;

    /// Commits reachable from `head_ref` but not from `base_sha`.
    ///
    /// The base commit itself is not included.
    async fn compare_commits(&self, base_sha: &str, head_ref: &str) -> DomainResult<Vec<Commit>>;

    /// Fetch an issue or pull request by number.
    ///
    /// Fails with [`DomainError::NotFound`](crate::domain::errors::DomainError::NotFound)
    /// for unknown numbers.
    async fn get_issue(&self, number: u64) -> DomainResult<IssueOrPr>;

    /// Whether the repository owner is an organization or a user.
    async fn get_owner_kind(&self) -> DomainResult<OwnerKind>;

    /// Publish a release.
    async fn create_release(&self, release: &NewRelease) -> DomainResult<()>;

    /// Add `label` to a single issue or pull request.
    async fn add_label(&self, issue_number: u64, label: &str) -> DomainResult<()>;
}

/// Port for structured (GraphQL) queries and mutations.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Numbers of the issues a pull request will close, first 100 only,
    /// including issues linked by any user.
    async fn closing_issue_numbers(&self, pr_number: u64) -> DomainResult<Vec<i64>>;

    /// Node id of project `project_number` owned by `owner_login`.
    async fn project_id(
        &self,
        owner_kind: OwnerKind,
        owner_login: &str,
        project_number: u64,
    ) -> DomainResult<String>;

    /// First 100 fields of a project, with type-specific sub-selections.
    async fn project_fields(&self, project_id: &str) -> DomainResult<Vec<ProjectField>>;

    /// Add a content node (issue) to a project and return the item id.
    ///
    /// Re-adding already-linked content returns the existing item id.
    async fn add_item_to_project(&self, project_id: &str, content_id: &str) -> DomainResult<String>;

    /// Set a field value on a project item.
    async fn update_item_field(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        value: &FieldValueInput,
    ) -> DomainResult<()>;
}
