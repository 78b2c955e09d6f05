//! Project (V2) field resolution and updates.
//!
//! A field is addressed by its human name and a value is given as text. The
//! updater resolves the project and field schema on every call, maps the
//! text to the typed mutation input and applies it to the issue's project
//! item. Nothing is cached between calls.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{FieldValueInput, ProjectField};
use crate::domain::ports::{ProjectsApi, RepositoryApi};

/// Map a human value to what the mutation expects for `field`.
///
/// - `[n]` selects the option at zero-based index `n`.
/// - Any other value selects the option whose name matches case-insensitively.
/// - Fields without options, unmatched names, and out-of-range or
///   non-numeric indices all pass the raw value through unchanged.
pub fn resolve_value(field: &ProjectField, value: &str) -> String {
    let Some(options) = field.options.as_deref() else {
        return value.to_string();
    };

    let selected = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(index) => index
            .parse::<usize>()
            .ok()
            .and_then(|index| options.get(index)),
        None => options
            .iter()
            .find(|option| option.name.to_lowercase() == value.to_lowercase()),
    };

    selected.map_or_else(|| value.to_string(), |option| option.id.clone())
}

/// Locate a field by exact name.
pub fn find_field<'a>(fields: &'a [ProjectField], name: &str) -> Option<&'a ProjectField> {
    fields.iter().find(|field| field.name == name)
}

/// Result of one successful field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFieldUpdate {
    pub issue: u64,
    pub item_id: String,
    pub field_id: String,
    /// Mutation key the value was sent under.
    pub key: &'static str,
    pub value: String,
}

pub struct ProjectFieldUpdater {
    repo: Arc<dyn RepositoryApi>,
    projects: Arc<dyn ProjectsApi>,
}

impl ProjectFieldUpdater {
    pub fn new(repo: Arc<dyn RepositoryApi>, projects: Arc<dyn ProjectsApi>) -> Self {
        Self { repo, projects }
    }

    /// Node id of the repository owner's project `project_number`.
    pub async fn project_id(&self, project_number: u64) -> DomainResult<String> {
        let owner_kind = self.repo.get_owner_kind().await?;
        debug!(owner_kind = owner_kind.as_str(), "Resolved repository owner kind");
        self.projects
            .project_id(owner_kind, self.repo.owner(), project_number)
            .await
    }

    /// Set `field_name` to `value` on issue `issue_number` in project `project_number`.
    ///
    /// The issue is added to the project first (re-adding returns the
    /// existing item). An unknown field name fails with
    /// [`DomainError::FieldNotFound`] and a field type that cannot be
    /// written fails with [`DomainError::UnsupportedFieldType`].
    #[instrument(skip(self, value), fields(owner = %self.repo.owner(), repo = %self.repo.repo()))]
    pub async fn update_field(
        &self,
        project_number: u64,
        issue_number: u64,
        field_name: &str,
        value: &str,
    ) -> DomainResult<ProjectFieldUpdate> {
        let project_id = self.project_id(project_number).await?;
        let issue = self.repo.get_issue(issue_number).await?;
        let item_id = self
            .projects
            .add_item_to_project(&project_id, &issue.node_id)
            .await?;
        debug!(issue = issue_number, item_id = %item_id, "Issue linked to project");

        let fields = self.projects.project_fields(&project_id).await?;
        let field = find_field(&fields, field_name).ok_or_else(|| DomainError::FieldNotFound {
            field: field_name.to_string(),
            project: project_number.to_string(),
        })?;

        let resolved = resolve_value(field, value);
        let input = FieldValueInput::new(field.data_type.mutation_key()?, resolved);

        self.projects
            .update_item_field(&project_id, &item_id, &field.id, &input)
            .await?;
        info!(
            issue = issue_number,
            field = field_name,
            key = input.key.as_str(),
            value = %input.value,
            "Updated project field"
        );

        Ok(ProjectFieldUpdate {
            issue: issue_number,
            item_id,
            field_id: field.id.clone(),
            key: input.key.as_str(),
            value: input.value,
        })
    }
}
