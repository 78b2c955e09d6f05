//! Applies a label to issues one at a time.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::ports::RepositoryApi;

pub struct IssueLabeler {
    repo: Arc<dyn RepositoryApi>,
}

impl IssueLabeler {
    pub fn new(repo: Arc<dyn RepositoryApi>) -> Self {
        Self { repo }
    }

    /// Add `label` to each issue in order; the first failure aborts.
    pub async fn apply(&self, label: &str, issue_numbers: &[u64]) -> DomainResult<()> {
        for &number in issue_numbers {
            self.repo.add_label(number, label).await?;
            info!(issue = number, label, "Applied label");
        }
        Ok(())
    }
}
