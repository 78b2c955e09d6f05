//! In-memory GitHub for testing.
//!
//! Implements both GitHub ports over plain maps and records every mutation
//! so tests can assert on side effects without a network.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Commit, FieldValueInput, IssueOrPr, NewRelease, OwnerKind, ProjectField,
};
use crate::domain::ports::{ProjectsApi, RepositoryApi};

/// A recorded `update_item_field` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub project_id: String,
    pub item_id: String,
    pub field_id: String,
    pub value: FieldValueInput,
}

#[derive(Debug, Default)]
struct State {
    commits_by_ref: HashMap<String, Commit>,
    branch_commits: HashMap<String, Vec<Commit>>,
    comparisons: HashMap<(String, String), Vec<Commit>>,
    issues: HashMap<u64, IssueOrPr>,
    closing: HashMap<u64, Vec<i64>>,
    projects: HashMap<u64, String>,
    fields: HashMap<String, Vec<ProjectField>>,
    failing: HashSet<&'static str>,
    issue_lookups: Vec<u64>,
    releases: Vec<NewRelease>,
    labels: Vec<(u64, String)>,
    items: HashMap<(String, String), String>,
    field_updates: Vec<FieldUpdate>,
}

/// In-memory implementation of [`RepositoryApi`] and [`ProjectsApi`].
#[derive(Debug)]
pub struct InMemoryGitHub {
    owner: String,
    repo: String,
    owner_kind: OwnerKind,
    state: Mutex<State>,
}

impl InMemoryGitHub {
    /// Create an empty repository owned by an organization.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            owner_kind: OwnerKind::Organization,
            state: Mutex::new(State::default()),
        }
    }

    /// Set the owner kind reported by `get_owner_kind`.
    #[must_use]
    pub fn with_owner_kind(mut self, owner_kind: OwnerKind) -> Self {
        self.owner_kind = owner_kind;
        self
    }

    /// Make `reference` resolve to `commit`.
    #[must_use]
    pub fn with_ref(mut self, reference: impl Into<String>, commit: Commit) -> Self {
        self.state.get_mut().commits_by_ref.insert(reference.into(), commit);
        self
    }

    /// Set the commit page returned for `branch`.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>, commits: Vec<Commit>) -> Self {
        self.state.get_mut().branch_commits.insert(branch.into(), commits);
        self
    }

    /// Set the commits between `base_sha` and `head_ref`.
    #[must_use]
    pub fn with_comparison(
        mut self,
        base_sha: impl Into<String>,
        head_ref: impl Into<String>,
        commits: Vec<Commit>,
    ) -> Self {
        self.state
            .get_mut()
            .comparisons
            .insert((base_sha.into(), head_ref.into()), commits);
        self
    }

    /// Add an issue or pull request.
    #[must_use]
    pub fn with_issue(mut self, issue: IssueOrPr) -> Self {
        self.state.get_mut().issues.insert(issue.number, issue);
        self
    }

    /// Set the issues pull request `pr_number` closes.
    #[must_use]
    pub fn with_closing(mut self, pr_number: u64, issues: Vec<i64>) -> Self {
        self.state.get_mut().closing.insert(pr_number, issues);
        self
    }

    /// Add a project with its fields.
    #[must_use]
    pub fn with_project(
        mut self,
        number: u64,
        project_id: impl Into<String>,
        fields: Vec<ProjectField>,
    ) -> Self {
        let project_id = project_id.into();
        let state = self.state.get_mut();
        state.projects.insert(number, project_id.clone());
        state.fields.insert(project_id, fields);
        self
    }

    /// Make every call of `operation` fail with an API error.
    #[must_use]
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.state.get_mut().failing.insert(operation);
        self
    }

    /// Numbers passed to `get_issue`, in call order.
    pub async fn issue_lookups(&self) -> Vec<u64> {
        self.state.lock().await.issue_lookups.clone()
    }

    /// Releases created so far.
    pub async fn releases(&self) -> Vec<NewRelease> {
        self.state.lock().await.releases.clone()
    }

    /// `(issue, label)` pairs applied so far.
    pub async fn labels(&self) -> Vec<(u64, String)> {
        self.state.lock().await.labels.clone()
    }

    /// Field updates applied so far.
    pub async fn field_updates(&self) -> Vec<FieldUpdate> {
        self.state.lock().await.field_updates.clone()
    }

    /// Number of distinct project items created.
    pub async fn item_count(&self) -> usize {
        self.state.lock().await.items.len()
    }

    fn check(state: &State, operation: &'static str) -> DomainResult<()> {
        if state.failing.contains(operation) {
            return Err(DomainError::Api {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RepositoryApi for InMemoryGitHub {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    async fn get_commit(&self, reference: &str) -> DomainResult<Commit> {
        let state = self.state.lock().await;
        Self::check(&state, "get_commit")?;
        state
            .commits_by_ref
            .get(reference)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("ref {reference}")))
    }

    async fn list_commits(&self, branch: &str) -> DomainResult<Vec<Commit>> {
        let state = self.state.lock().await;
        Self::check(&state, "list_commits")?;
        state
            .branch_commits
            .get(branch)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("branch {branch}")))
    }

    async fn compare_commits(&self, base_sha: &str, head_ref: &str) -> DomainResult<Vec<Commit>> {
        let state = self.state.lock().await;
        Self::check(&state, "compare_commits")?;
        state
            .comparisons
            .get(&(base_sha.to_string(), head_ref.to_string()))
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("{base_sha}...{head_ref}")))
    }

    async fn get_issue(&self, number: u64) -> DomainResult<IssueOrPr> {
        let mut state = self.state.lock().await;
        state.issue_lookups.push(number);
        Self::check(&state, "get_issue")?;
        state
            .issues
            .get(&number)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("issue #{number}")))
    }

    async fn get_owner_kind(&self) -> DomainResult<OwnerKind> {
        let state = self.state.lock().await;
        Self::check(&state, "get_owner_kind")?;
        Ok(self.owner_kind)
    }

    async fn create_release(&self, release: &NewRelease) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        Self::check(&state, "create_release")?;
        state.releases.push(release.clone());
        Ok(())
    }

    async fn add_label(&self, issue_number: u64, label: &str) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        Self::check(&state, "add_label")?;
        state.labels.push((issue_number, label.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ProjectsApi for InMemoryGitHub {
    async fn closing_issue_numbers(&self, pr_number: u64) -> DomainResult<Vec<i64>> {
        let state = self.state.lock().await;
        Self::check(&state, "closing_issue_numbers")?;
        state
            .closing
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("pull request #{pr_number}")))
    }

    async fn project_id(
        &self,
        owner_kind: OwnerKind,
        owner_login: &str,
        project_number: u64,
    ) -> DomainResult<String> {
        let state = self.state.lock().await;
        Self::check(&state, "project_id")?;
        if owner_kind != self.owner_kind || owner_login != self.owner {
            return Err(DomainError::GraphQl(format!(
                "Could not resolve to a {} with the login of '{owner_login}'",
                owner_kind.as_str()
            )));
        }
        state
            .projects
            .get(&project_number)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("project #{project_number}")))
    }

    async fn project_fields(&self, project_id: &str) -> DomainResult<Vec<ProjectField>> {
        let state = self.state.lock().await;
        Self::check(&state, "project_fields")?;
        state
            .fields
            .get(project_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("project node {project_id}")))
    }

    async fn add_item_to_project(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> DomainResult<String> {
        let mut state = self.state.lock().await;
        Self::check(&state, "add_item_to_project")?;
        let next_id = format!("PVTI_{}", state.items.len() + 1);
        let item_id = state
            .items
            .entry((project_id.to_string(), content_id.to_string()))
            .or_insert(next_id);
        Ok(item_id.clone())
    }

    async fn update_item_field(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        value: &FieldValueInput,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        Self::check(&state, "update_item_field")?;
        state.field_updates.push(FieldUpdate {
            project_id: project_id.to_string(),
            item_id: item_id.to_string(),
            field_id: field_id.to_string(),
            value: value.clone(),
        });
        Ok(())
    }
}
