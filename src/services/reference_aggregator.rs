//! Collects the issues covered by a release range.
//!
//! Commits are resolved, their `#<number>` references fetched, and every pull
//! request is replaced by the issues it closes. The replacement goes exactly
//! one level deep: a closing reference that is itself a pull request is kept
//! as-is. Issues closed by several pull requests appear once per pull request.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::IssueOrPr;
use crate::domain::ports::{ProjectsApi, RepositoryApi};
use crate::services::commit_range::CommitRangeResolver;
use crate::services::issue_fetcher::IssueFetcher;
use crate::services::link_resolver::LinkResolver;
use crate::services::reference_extractor::extract_issue_numbers;

/// Release range boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRange {
    /// Start tag; empty means the oldest commit of the branch's first page.
    pub start_tag: String,
    pub end_tag: String,
    pub branch: String,
}

impl ReleaseRange {
    pub fn new(
        start_tag: impl Into<String>,
        end_tag: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            start_tag: start_tag.into(),
            end_tag: end_tag.into(),
            branch: branch.into(),
        }
    }
}

pub struct ReferenceAggregator {
    range_resolver: CommitRangeResolver,
    fetcher: IssueFetcher,
    links: LinkResolver,
}

impl ReferenceAggregator {
    pub fn new(repo: Arc<dyn RepositoryApi>, projects: Arc<dyn ProjectsApi>) -> Self {
        Self {
            range_resolver: CommitRangeResolver::new(repo.clone()),
            fetcher: IssueFetcher::new(repo),
            links: LinkResolver::new(projects),
        }
    }

    /// Issues covered by `range`, pull requests flattened to their closing issues.
    ///
    /// Only range resolution can fail; individual lookups drop silently.
    #[instrument(skip(self), fields(start = %range.start_tag, end = %range.end_tag))]
    pub async fn collect(&self, range: &ReleaseRange) -> DomainResult<Vec<IssueOrPr>> {
        let commits = self
            .range_resolver
            .resolve(&range.start_tag, &range.end_tag, &range.branch)
            .await?;

        let numbers: Vec<i64> = extract_issue_numbers(&commits).into_iter().collect();
        debug!(?numbers, "Extracted issue references");

        let records = self.fetcher.fetch(&numbers).await;
        let issues = self.flatten(records).await;
        info!(count = issues.len(), "Collected release issues");
        Ok(issues)
    }

    /// Replace each pull request by its closing issues; depth is bounded at one.
    async fn flatten(&self, records: Vec<IssueOrPr>) -> Vec<IssueOrPr> {
        let mut issues = Vec::with_capacity(records.len());
        for record in records {
            if !record.is_pull_request() {
                issues.push(record);
                continue;
            }
            let closing = self.links.closing_issues(record.number).await;
            debug!(pr = record.number, ?closing, "Expanding pull request");
            issues.extend(self.fetcher.fetch(&closing).await);
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGitHub;
    use crate::domain::errors::DomainError;
    use crate::domain::models::Commit;

    fn range() -> ReleaseRange {
        ReleaseRange::new("v1.0.0", "v1.1.0", "main")
    }

    fn github_with_messages(messages: &[&str]) -> InMemoryGitHub {
        let commits = messages
            .iter()
            .enumerate()
            .map(|(i, m)| Commit::new(format!("c{i}"), *m))
            .collect();
        InMemoryGitHub::new("org", "repo")
            .with_ref("v1.0.0", Commit::new("base", "release 1.0.0"))
            .with_comparison("base", "v1.1.0", commits)
    }

    fn numbers(issues: &[IssueOrPr]) -> Vec<u64> {
        issues.iter().map(|i| i.number).collect()
    }

    #[tokio::test]
    async fn test_pull_requests_are_replaced_by_closing_issues() {
        let github = github_with_messages(&["fix: patch (#5)", "feat: add (#6)"])
            .with_issue(IssueOrPr::issue(5, "Crash").with_label("bug"))
            .with_issue(IssueOrPr::pull_request(6, "Add export"))
            .with_issue(IssueOrPr::issue(7, "Export").with_label("enhancement"))
            .with_closing(6, vec![7]);
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        let issues = aggregator.collect(&range()).await.unwrap();
        assert_eq!(numbers(&issues), vec![5, 7]);
    }

    #[tokio::test]
    async fn test_pull_request_without_links_contributes_nothing() {
        let github = github_with_messages(&["feat: add (#6)"])
            .with_issue(IssueOrPr::pull_request(6, "Add export"))
            .with_closing(6, vec![]);
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        assert!(aggregator.collect(&range()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shared_closing_issue_is_not_deduplicated() {
        let github = github_with_messages(&["#6", "#8"])
            .with_issue(IssueOrPr::pull_request(6, "Part one"))
            .with_issue(IssueOrPr::pull_request(8, "Part two"))
            .with_issue(IssueOrPr::issue(7, "Feature"))
            .with_closing(6, vec![7])
            .with_closing(8, vec![7]);
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        let issues = aggregator.collect(&range()).await.unwrap();
        assert_eq!(numbers(&issues), vec![7, 7]);
    }

    #[tokio::test]
    async fn test_expansion_stops_after_one_level() {
        let github = github_with_messages(&["#6"])
            .with_issue(IssueOrPr::pull_request(6, "Outer"))
            .with_issue(IssueOrPr::pull_request(10, "Inner"))
            .with_issue(IssueOrPr::issue(11, "Deep"))
            .with_closing(6, vec![10])
            .with_closing(10, vec![11]);
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        let issues = aggregator.collect(&range()).await.unwrap();
        assert_eq!(numbers(&issues), vec![10]);
        assert!(issues[0].is_pull_request());
    }

    #[tokio::test]
    async fn test_unknown_references_are_dropped() {
        let github = github_with_messages(&["see #404 and #5"])
            .with_issue(IssueOrPr::issue(5, "Crash"));
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        let issues = aggregator.collect(&range()).await.unwrap();
        assert_eq!(numbers(&issues), vec![5]);
    }

    #[tokio::test]
    async fn test_range_failure_is_fatal() {
        let github = github_with_messages(&["#5"]).failing("get_commit");
        let github = Arc::new(github);
        let aggregator = ReferenceAggregator::new(github.clone(), github);

        let err = aggregator.collect(&range()).await.unwrap_err();
        assert!(matches!(err, DomainError::Api { .. }));
    }
}
