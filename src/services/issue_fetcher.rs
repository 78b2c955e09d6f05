//! Concurrent issue and pull request lookups that tolerate missing numbers.

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::models::IssueOrPr;
use crate::domain::ports::RepositoryApi;

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(IssueOrPr),
    Missing,
}

impl Lookup {
    pub fn found(self) -> Option<IssueOrPr> {
        match self {
            Self::Found(record) => Some(record),
            Self::Missing => None,
        }
    }
}

/// Resolves raw numbers to issue-or-PR records.
pub struct IssueFetcher {
    repo: Arc<dyn RepositoryApi>,
}

impl IssueFetcher {
    pub fn new(repo: Arc<dyn RepositoryApi>) -> Self {
        Self { repo }
    }

    /// Look up a single number.
    ///
    /// Non-positive numbers are `Missing` without a request. Every lookup
    /// error is swallowed.
    pub async fn lookup(&self, number: i64) -> Lookup {
        let number = match u64::try_from(number) {
            Ok(n) if n > 0 => n,
            _ => {
                debug!(issue = number, "Skipping non-positive issue number");
                return Lookup::Missing;
            }
        };

        match self.repo.get_issue(number).await {
            Ok(record) => Lookup::Found(record),
            Err(e) => {
                debug!(issue = number, error = %e, "Issue lookup failed, dropping");
                Lookup::Missing
            }
        }
    }

    /// Look up every number concurrently and keep the ones that resolved,
    /// in input order.
    pub async fn fetch(&self, numbers: &[i64]) -> Vec<IssueOrPr> {
        join_all(numbers.iter().map(|&n| self.lookup(n)))
            .await
            .into_iter()
            .filter_map(Lookup::found)
            .collect()
    }
}
