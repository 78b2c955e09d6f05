//! Release orchestration.
//!
//! Collects the issues of a range, renders notes, publishes the release and
//! then syncs metadata (label, project field) onto every resolved issue.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueOrPr, NewRelease};
use crate::domain::ports::{ProjectsApi, RepositoryApi};
use crate::services::labeler::IssueLabeler;
use crate::services::project_fields::{ProjectFieldUpdate, ProjectFieldUpdater};
use crate::services::reference_aggregator::{ReferenceAggregator, ReleaseRange};
use crate::services::release_notes::render_release_notes;

/// Field to set on every released issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub project_number: u64,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub range: ReleaseRange,
    pub title: String,
    pub prerelease: bool,
    /// Skip publishing; labels and project fields are still applied.
    pub dry_run: bool,
    pub label: Option<String>,
    pub field: Option<FieldAssignment>,
}

/// A project update that was skipped because the field contract did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUpdate {
    pub issue: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOutcome {
    pub tag: String,
    pub title: String,
    pub notes: String,
    pub issues: Vec<IssueOrPr>,
    pub published: bool,
    pub labeled: Vec<u64>,
    pub field_updates: Vec<ProjectFieldUpdate>,
    pub skipped: Vec<SkippedUpdate>,
}

pub struct ReleaseService {
    repo: Arc<dyn RepositoryApi>,
    aggregator: ReferenceAggregator,
    labeler: IssueLabeler,
    updater: ProjectFieldUpdater,
}

impl ReleaseService {
    pub fn new(repo: Arc<dyn RepositoryApi>, projects: Arc<dyn ProjectsApi>) -> Self {
        Self {
            aggregator: ReferenceAggregator::new(repo.clone(), projects.clone()),
            labeler: IssueLabeler::new(repo.clone()),
            updater: ProjectFieldUpdater::new(repo.clone(), projects),
            repo,
        }
    }

    /// Issues covered by `range`.
    pub async fn issues(&self, range: &ReleaseRange) -> DomainResult<Vec<IssueOrPr>> {
        self.aggregator.collect(range).await
    }

    /// Rendered release notes for `range`.
    pub async fn notes(&self, range: &ReleaseRange) -> DomainResult<String> {
        let issues = self.aggregator.collect(range).await?;
        Ok(render_release_notes(&issues))
    }

    /// Run a full release.
    ///
    /// Side effects happen in order: release, labels, project fields. A
    /// field contract failure on one issue is recorded and the loop moves
    /// on; any other failure aborts and leaves earlier effects in place.
    #[instrument(
        skip(self, request),
        fields(
            owner = %self.repo.owner(),
            repo = %self.repo.repo(),
            tag = %request.range.end_tag
        )
    )]
    pub async fn release(&self, request: &ReleaseRequest) -> DomainResult<ReleaseOutcome> {
        let issues = self.aggregator.collect(&request.range).await?;
        let notes = render_release_notes(&issues);

        let published = if request.dry_run {
            info!(notes = %notes, "Dry run, not creating release");
            false
        } else {
            let release = NewRelease {
                tag_name: request.range.end_tag.clone(),
                name: request.title.clone(),
                body: notes.clone(),
                prerelease: request.prerelease,
            };
            self.repo.create_release(&release).await?;
            info!(title = %request.title, "Created release");
            true
        };

        let targets = distinct_numbers(&issues);

        let mut labeled = Vec::new();
        if let Some(label) = &request.label {
            self.labeler.apply(label, &targets).await?;
            labeled.clone_from(&targets);
        }

        let mut field_updates = Vec::new();
        let mut skipped = Vec::new();
        if let Some(assignment) = &request.field {
            for &issue in &targets {
                match self
                    .updater
                    .update_field(
                        assignment.project_number,
                        issue,
                        &assignment.field,
                        &assignment.value,
                    )
                    .await
                {
                    Ok(update) => field_updates.push(update),
                    Err(e) if e.is_field_contract_error() => {
                        warn!(
                            issue,
                            field = %assignment.field,
                            error = %e,
                            "Skipping project update"
                        );
                        skipped.push(SkippedUpdate {
                            issue,
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(ReleaseOutcome {
            tag: request.range.end_tag.clone(),
            title: request.title.clone(),
            notes,
            issues,
            published,
            labeled,
            field_updates,
            skipped,
        })
    }
}

/// Issue numbers in first-seen order without repeats.
fn distinct_numbers(issues: &[IssueOrPr]) -> Vec<u64> {
    let mut seen = HashSet::new();
    issues
        .iter()
        .map(|issue| issue.number)
        .filter(|number| seen.insert(*number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGitHub;
    use crate::domain::errors::DomainError;
    use crate::domain::models::{Commit, FieldDataType, FieldOption, ProjectField};

    fn status_field() -> ProjectField {
        ProjectField {
            id: "PVTSSF_status".to_string(),
            name: "Status".to_string(),
            data_type: FieldDataType::SingleSelect,
            options: Some(vec![FieldOption {
                id: "opt_done".to_string(),
                name: "Done".to_string(),
            }]),
            configuration: None,
        }
    }

    fn github() -> InMemoryGitHub {
        InMemoryGitHub::new("org", "repo")
            .with_ref("v1.0.0", Commit::new("base", "release 1.0.0"))
            .with_comparison(
                "base",
                "v1.1.0",
                vec![
                    Commit::new("c1", "fix: patch (#5)"),
                    Commit::new("c2", "feat: add (#6)"),
                ],
            )
            .with_issue(IssueOrPr::issue(5, "Crash on start").with_label("bug"))
            .with_issue(IssueOrPr::pull_request(6, "Add export"))
            .with_issue(IssueOrPr::issue(7, "Export to CSV").with_label("enhancement"))
            .with_closing(6, vec![7])
            .with_project(2, "PVT_2", vec![status_field()])
    }

    fn request() -> ReleaseRequest {
        ReleaseRequest {
            range: ReleaseRange::new("v1.0.0", "v1.1.0", "main"),
            title: "v1.1.0".to_string(),
            prerelease: false,
            dry_run: false,
            label: None,
            field: None,
        }
    }

    fn service(github: InMemoryGitHub) -> (ReleaseService, Arc<InMemoryGitHub>) {
        let github = Arc::new(github);
        (ReleaseService::new(github.clone(), github.clone()), github)
    }

    #[tokio::test]
    async fn test_release_publishes_grouped_notes() {
        let (service, github) = service(github());

        let outcome = service.release(&request()).await.unwrap();
        let expected =
            "## Enhancements\n- Export to CSV (#7)\n\n## Bug Fixes\n- Crash on start (#5)";
        assert_eq!(outcome.notes, expected);
        assert!(outcome.published);

        let releases = github.releases().await;
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].tag_name, "v1.1.0");
        assert_eq!(releases[0].body, expected);
        assert!(!releases[0].prerelease);
    }

    #[tokio::test]
    async fn test_dry_run_only_skips_publishing() {
        let (service, github) = service(github());
        let mut request = request();
        request.dry_run = true;
        request.label = Some("released".to_string());

        let outcome = service.release(&request).await.unwrap();
        assert!(!outcome.published);
        assert!(github.releases().await.is_empty());
        assert_eq!(github.labels().await.len(), 2);
    }

    #[tokio::test]
    async fn test_labels_and_fields_are_applied_per_issue() {
        let (service, github) = service(github());
        let mut request = request();
        request.label = Some("released".to_string());
        request.field = Some(FieldAssignment {
            project_number: 2,
            field: "Status".to_string(),
            value: "done".to_string(),
        });

        let outcome = service.release(&request).await.unwrap();
        assert_eq!(outcome.labeled, vec![5, 7]);
        assert_eq!(outcome.field_updates.len(), 2);
        assert!(outcome.field_updates.iter().all(|u| u.value == "opt_done"));
        assert_eq!(github.field_updates().await.len(), 2);
    }

    #[tokio::test]
    async fn test_field_contract_errors_do_not_abort() {
        let (service, github) = service(github());
        let mut request = request();
        request.label = Some("released".to_string());
        request.field = Some(FieldAssignment {
            project_number: 2,
            field: "Priority".to_string(),
            value: "High".to_string(),
        });

        let outcome = service.release(&request).await.unwrap();
        assert_eq!(outcome.skipped.len(), 2);
        assert!(outcome.field_updates.is_empty());
        assert_eq!(github.labels().await.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_errors_abort_after_release() {
        let (service, github) = service(github().failing("add_label"));
        let mut request = request();
        request.label = Some("released".to_string());

        let err = service.release(&request).await.unwrap_err();
        assert!(matches!(err, DomainError::Api { .. }));
        assert_eq!(github.releases().await.len(), 1);
    }

    #[tokio::test]
    async fn test_notes_and_issues() {
        let (service, _) = service(github());
        let range = ReleaseRange::new("v1.0.0", "v1.1.0", "main");

        let issues = service.issues(&range).await.unwrap();
        assert_eq!(issues.iter().map(|i| i.number).collect::<Vec<_>>(), vec![5, 7]);
        assert!(service.notes(&range).await.unwrap().starts_with("## Enhancements"));
    }

    #[test]
    fn test_distinct_numbers_keeps_first_occurrence() {
        let issues = vec![
            IssueOrPr::issue(7, "a"),
            IssueOrPr::issue(5, "b"),
            IssueOrPr::issue(7, "a"),
        ];
        assert_eq!(distinct_numbers(&issues), vec![7, 5]);
    }
}
