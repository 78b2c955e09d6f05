//! Release and project-sync engines built on the GitHub ports.

pub mod commit_range;
pub mod issue_fetcher;
pub mod labeler;
pub mod link_resolver;
pub mod project_fields;
pub mod reference_aggregator;
pub mod reference_extractor;
pub mod release_notes;
pub mod release_service;

pub use commit_range::CommitRangeResolver;
pub use issue_fetcher::{IssueFetcher, Lookup};
pub use labeler::IssueLabeler;
pub use link_resolver::LinkResolver;
pub use project_fields::{resolve_value, ProjectFieldUpdate, ProjectFieldUpdater};
pub use reference_aggregator::{ReferenceAggregator, ReleaseRange};
pub use reference_extractor::extract_issue_numbers;
pub use release_notes::{render_release_notes, NoteGroup, NO_CHANGES};
pub use release_service::{
    FieldAssignment, ReleaseOutcome, ReleaseRequest, ReleaseService, SkippedUpdate,
};
