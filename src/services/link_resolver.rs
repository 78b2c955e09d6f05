//! Pull request to closing-issue linkage.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::ProjectsApi;

/// Resolves the issues a pull request closes on merge.
pub struct LinkResolver {
    projects: Arc<dyn ProjectsApi>,
}

impl LinkResolver {
    pub fn new(projects: Arc<dyn ProjectsApi>) -> Self {
        Self { projects }
    }

    /// Closing issue numbers of `pr_number` in API order.
    ///
    /// Any failure yields an empty list.
    pub async fn closing_issues(&self, pr_number: u64) -> Vec<i64> {
        match self.projects.closing_issue_numbers(pr_number).await {
            Ok(numbers) => numbers,
            Err(e) => {
                debug!(
                    pr = pr_number,
                    error = %e,
                    "Closing issue lookup failed, treating as unlinked"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGitHub;

    #[tokio::test]
    async fn test_returns_linked_issues_in_order() {
        let github = InMemoryGitHub::new("org", "repo").with_closing(6, vec![9, 7]);
        let resolver = LinkResolver::new(Arc::new(github));
        assert_eq!(resolver.closing_issues(6).await, vec![9, 7]);
    }

    #[tokio::test]
    async fn test_unknown_pull_request_is_empty() {
        let resolver = LinkResolver::new(Arc::new(InMemoryGitHub::new("org", "repo")));
        assert!(resolver.closing_issues(6).await.is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_is_empty() {
        let github = InMemoryGitHub::new("org", "repo")
            .with_closing(6, vec![7])
            .failing("closing_issue_numbers");
        let resolver = LinkResolver::new(Arc::new(github));
        assert!(resolver.closing_issues(6).await.is_empty());
    }
}
