//! GitHub HTTP client with rate limiting.
//!
//! Wraps the GitHub REST API v3 and the GraphQL API, implementing the
//! [`RepositoryApi`] and [`ProjectsApi`] ports for a single owner/repo.
//! Includes a token-bucket rate limiter to stay within the authenticated
//! request budget. Failed calls are never retried here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Commit, Config, FieldValueInput, IssueOrPr, NewRelease, OwnerKind, ProjectField,
};
use crate::domain::ports::{ProjectsApi, RepositoryApi};

use super::models::{
    AddItemData, AddLabelsRequest, ClosingIssuesData, CreateReleaseRequest, GraphQlRequest,
    GraphQlResponse, ProjectFieldsData, ProjectIdData, RawProjectField, RestCommit,
    RestComparison, RestRepository,
};
use super::queries;

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum tokens in the bucket.
    capacity: u32,
    /// Current available tokens.
    tokens: u32,
    /// Duration of the refill window.
    window: Duration,
    /// When the current window started.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                "GitHub rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity.saturating_sub(1);
            self.window_start = Instant::now();
        }
    }
}

/// Derive the GraphQL endpoint from a REST base URL.
///
/// `https://api.github.com` → `https://api.github.com/graphql`;
/// GitHub Enterprise `https://host/api/v3` → `https://host/api/graphql`.
pub fn graphql_endpoint(api_base_url: &str) -> String {
    let base = api_base_url.trim_end_matches('/');
    base.strip_suffix("/v3").map_or_else(
        || format!("{base}/graphql"),
        |api_root| format!("{api_root}/graphql"),
    )
}

/// HTTP client for the GitHub REST and GraphQL APIs, bound to one repository.
///
/// REST failures map to [`DomainError::NotFound`] (404),
/// [`DomainError::Api`] (other non-2xx) or [`DomainError::Transport`];
/// GraphQL `errors` arrays map to [`DomainError::GraphQl`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// GitHub personal access token or workflow token.
    token: String,
    /// REST base URL without trailing slash.
    api_base_url: String,
    /// GraphQL endpoint.
    graphql_url: String,
    /// Repository owner login.
    owner: String,
    /// Repository name.
    repo: String,
    /// Shared rate limiter.
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GitHubClient {
    /// Create a new client for `owner/repo` against the public API.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        let mut config = Config::default();
        config.github.owner = owner.into();
        config.github.repo = repo.into();
        config.github.token = Some(token.into());
        Self::build(&config, Client::new())
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.github.timeout_secs))
            .build()
            .map_err(|e| DomainError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::build(config, http))
    }

    fn build(config: &Config, http: Client) -> Self {
        let api_base_url = config.github.api_base_url.trim_end_matches('/').to_string();
        let rate_limiter = RateLimiter::new(
            config.rate_limit.capacity,
            Duration::from_secs(config.rate_limit.window_secs),
        );
        Self {
            http,
            token: config.github.token.clone().unwrap_or_default(),
            graphql_url: graphql_endpoint(&api_base_url),
            api_base_url,
            owner: config.github.owner.clone(),
            repo: config.github.repo.clone(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "relsync")
    }

    /// Build `<base>/repos/{owner}/{repo}/<segments...>`.
    ///
    /// Each segment is percent-encoded on its own, so refs containing `/`,
    /// `#` or `%` stay a single path segment.
    fn repo_url(&self, segments: &[&str]) -> DomainResult<Url> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| {
            DomainError::ValidationFailed(format!(
                "Invalid API base URL '{}': {e}",
                self.api_base_url
            ))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                DomainError::ValidationFailed(format!(
                    "API base URL '{}' cannot carry a path",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    /// Send a request and turn non-success statuses into domain errors.
    async fn send(&self, request: RequestBuilder, operation: &str) -> DomainResult<Response> {
        let resp = request.send().await.map_err(|e| {
            DomainError::Transport(format!("GitHub {operation} request failed: {e}"))
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(DomainError::NotFound(format!("GitHub {operation}: {body}")));
        }
        Err(DomainError::Api {
            status: status.as_u16(),
            message: format!("GitHub {operation} failed: {body}"),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        operation: &str,
    ) -> DomainResult<T> {
        let request = self
            .rate_limited_request(Method::GET, url)
            .await
            .query(query);
        let resp = self.send(request, operation).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Execute a GraphQL document and return its `data`.
    ///
    /// Any entry in the `errors` array fails the whole call, even when
    /// partial data is present.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        operation: &str,
    ) -> DomainResult<T> {
        let body = GraphQlRequest { query, variables };
        let request = self
            .rate_limited_request(Method::POST, &self.graphql_url)
            .await
            .json(&body);
        let resp = self.send(request, operation).await?;

        let envelope = resp.json::<GraphQlResponse<T>>().await?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(DomainError::GraphQl(format!(
                "{operation}: {}",
                messages.join("; ")
            )));
        }

        envelope
            .data
            .ok_or_else(|| DomainError::GraphQl(format!("{operation}: response has no data")))
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    async fn get_commit(&self, reference: &str) -> DomainResult<Commit> {
        let url = self.repo_url(&["commits", reference])?;
        let commit: RestCommit = self.get_json(url, &[], "get_commit").await?;
        Ok(commit.into())
    }

    async fn list_commits(&self, branch: &str) -> DomainResult<Vec<Commit>> {
        let url = self.repo_url(&["commits"])?;
        let query = [("sha", branch), ("per_page", "100")];
        let commits: Vec<RestCommit> = self.get_json(url, &query, "list_commits").await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    async fn compare_commits(&self, base_sha: &str, head_ref: &str) -> DomainResult<Vec<Commit>> {
        let basehead = format!("{base_sha}...{head_ref}");
        let url = self.repo_url(&["compare", &basehead])?;
        let comparison: RestComparison = self.get_json(url, &[], "compare_commits").await?;
        Ok(comparison.commits.into_iter().map(Commit::from).collect())
    }

    async fn get_issue(&self, number: u64) -> DomainResult<IssueOrPr> {
        let url = self.repo_url(&["issues", &number.to_string()])?;
        match self.get_json(url, &[], "get_issue").await {
            Err(DomainError::Api { status: 422, message }) => Err(DomainError::NotFound(message)),
            other => other,
        }
    }

    async fn get_owner_kind(&self) -> DomainResult<OwnerKind> {
        let url = self.repo_url(&[])?;
        let repository: RestRepository = self.get_json(url, &[], "get_repository").await?;
        OwnerKind::from_str(&repository.owner.owner_type).ok_or_else(|| {
            DomainError::ValidationFailed(format!(
                "Unsupported repository owner type '{}' for '{}'",
                repository.owner.owner_type, repository.owner.login
            ))
        })
    }

    async fn create_release(&self, release: &NewRelease) -> DomainResult<()> {
        let url = self.repo_url(&["releases"])?;
        let body = CreateReleaseRequest {
            tag_name: &release.tag_name,
            name: &release.name,
            body: &release.body,
            prerelease: release.prerelease,
        };
        let request = self
            .rate_limited_request(Method::POST, url)
            .await
            .json(&body);
        self.send(request, "create_release").await?;
        Ok(())
    }

    async fn add_label(&self, issue_number: u64, label: &str) -> DomainResult<()> {
        let number = issue_number.to_string();
        let url = self.repo_url(&["issues", &number, "labels"])?;
        let body = AddLabelsRequest {
            labels: vec![label],
        };
        let request = self
            .rate_limited_request(Method::POST, url)
            .await
            .json(&body);
        self.send(request, "add_label").await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectsApi for GitHubClient {
    async fn closing_issue_numbers(&self, pr_number: u64) -> DomainResult<Vec<i64>> {
        let variables = json!({
            "owner": self.owner,
            "repo": self.repo,
            "number": pr_number,
        });
        let data: ClosingIssuesData = self
            .graphql(queries::CLOSING_ISSUES, variables, "closing_issues")
            .await?;

        let pull_request = data
            .repository
            .and_then(|repo| repo.pull_request)
            .ok_or_else(|| DomainError::NotFound(format!("pull request #{pr_number}")))?;

        Ok(pull_request
            .closing_issues_references
            .nodes
            .into_iter()
            .flatten()
            .map(|node| node.number)
            .collect())
    }

    async fn project_id(
        &self,
        owner_kind: OwnerKind,
        owner_login: &str,
        project_number: u64,
    ) -> DomainResult<String> {
        let variables = json!({
            "projectOwnerName": owner_login,
            "projectNumber": project_number,
        });
        let data: ProjectIdData = self
            .graphql(queries::project_id(owner_kind), variables, "project_id")
            .await?;

        let owner = match owner_kind {
            OwnerKind::Organization => data.organization,
            OwnerKind::User => data.user,
        };
        owner
            .and_then(|owner| owner.project_v2)
            .map(|project| project.id)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "project #{project_number} of {} '{owner_login}'",
                    owner_kind.as_str()
                ))
            })
    }

    async fn project_fields(&self, project_id: &str) -> DomainResult<Vec<ProjectField>> {
        let variables = json!({ "projectId": project_id });
        let data: ProjectFieldsData = self
            .graphql(queries::PROJECT_FIELDS, variables, "project_fields")
            .await?;

        let fields = data
            .node
            .and_then(|node| node.fields)
            .ok_or_else(|| DomainError::NotFound(format!("project node {project_id}")))?;

        Ok(fields
            .nodes
            .into_iter()
            .flatten()
            .filter_map(RawProjectField::into_field)
            .collect())
    }

    async fn add_item_to_project(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> DomainResult<String> {
        let variables = json!({
            "input": {
                "projectId": project_id,
                "contentId": content_id,
            }
        });
        let data: AddItemData = self
            .graphql(queries::ADD_ITEM, variables, "add_item_to_project")
            .await?;
        Ok(data.add_item.item.id)
    }

    async fn update_item_field(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        value: &FieldValueInput,
    ) -> DomainResult<()> {
        let variables = json!({
            "input": {
                "projectId": project_id,
                "itemId": item_id,
                "fieldId": field_id,
                "value": value.to_json(),
            }
        });
        let _: serde_json::Value = self
            .graphql(queries::UPDATE_ITEM_FIELD, variables, "update_item_field")
            .await?;
        Ok(())
    }
}
