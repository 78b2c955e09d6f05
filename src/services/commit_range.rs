//! Resolves a release range to its ordered commits.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Commit;
use crate::domain::ports::RepositoryApi;

/// Service turning `(start_tag, end_tag, branch)` into the commits of a release.
pub struct CommitRangeResolver {
    repo: Arc<dyn RepositoryApi>,
}

impl CommitRangeResolver {
    pub fn new(repo: Arc<dyn RepositoryApi>) -> Self {
        Self { repo }
    }

    /// Commits between `start_tag` and `end_tag`, start commit first.
    ///
    /// An empty `start_tag` falls back to the oldest commit of the first
    /// page listed on `branch`.
    #[instrument(skip(self), fields(owner = %self.repo.owner(), repo = %self.repo.repo()))]
    pub async fn resolve(
        &self,
        start_tag: &str,
        end_tag: &str,
        branch: &str,
    ) -> DomainResult<Vec<Commit>> {
        let start = self.start_commit(start_tag, branch).await?;
        debug!(sha = %start.sha, "Resolved range start");

        let between = self.repo.compare_commits(&start.sha, end_tag).await?;

        let mut commits = Vec::with_capacity(between.len() + 1);
        commits.push(start);
        commits.extend(between);
        debug!(count = commits.len(), "Resolved commit range");
        Ok(commits)
    }

    async fn start_commit(&self, start_tag: &str, branch: &str) -> DomainResult<Commit> {
        if !start_tag.is_empty() {
            return self.repo.get_commit(start_tag).await;
        }
        self.repo
            .list_commits(branch)
            .await?
            .pop()
            .ok_or_else(|| DomainError::NotFound(format!("no commits on branch {branch}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGitHub;

    fn commit(sha: &str, message: &str) -> Commit {
        Commit::new(sha, message)
    }

    #[tokio::test]
    async fn test_start_tag_is_prepended() {
        let github = InMemoryGitHub::new("org", "repo")
            .with_ref("v1.0.0", commit("aaa", "release 1.0.0"))
            .with_comparison(
                "aaa",
                "v1.1.0",
                vec![commit("bbb", "fix: patch (#5)"), commit("ccc", "feat: add (#6)")],
            );
        let resolver = CommitRangeResolver::new(Arc::new(github));

        let commits = resolver.resolve("v1.0.0", "v1.1.0", "main").await.unwrap();
        let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["aaa", "bbb", "ccc"]);
    }

    #[tokio::test]
    async fn test_empty_start_tag_uses_last_listed_commit() {
        let github = InMemoryGitHub::new("org", "repo")
            .with_branch(
                "develop",
                vec![commit("new", "latest"), commit("mid", "middle"), commit("old", "oldest")],
            )
            .with_comparison("old", "v0.1.0", vec![commit("mid", "middle")]);
        let resolver = CommitRangeResolver::new(Arc::new(github));

        let commits = resolver.resolve("", "v0.1.0", "develop").await.unwrap();
        let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["old", "mid"]);
    }

    #[tokio::test]
    async fn test_empty_branch_page_is_not_found() {
        let github = InMemoryGitHub::new("org", "repo").with_branch("main", vec![]);
        let resolver = CommitRangeResolver::new(Arc::new(github));

        let err = resolver.resolve("", "v1.0.0", "main").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let github = InMemoryGitHub::new("org", "repo")
            .with_ref("v1.0.0", commit("aaa", "release"))
            .failing("compare_commits");
        let resolver = CommitRangeResolver::new(Arc::new(github));

        let err = resolver.resolve("v1.0.0", "v1.1.0", "main").await.unwrap_err();
        assert!(matches!(err, DomainError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unknown_start_tag_propagates() {
        let github = InMemoryGitHub::new("org", "repo");
        let resolver = CommitRangeResolver::new(Arc::new(github));

        let err = resolver.resolve("v9.9.9", "v1.1.0", "main").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
