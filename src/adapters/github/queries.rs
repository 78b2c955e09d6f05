//! GraphQL documents used by the GitHub adapter.
//!
//! Every document takes its inputs through variables. The project-id lookup
//! has one template per [`OwnerKind`] because `projectV2` hangs off different
//! root fields for organizations and users.

use crate::domain::models::OwnerKind;

/// Issues a pull request closes on merge (first 100, any linker).
pub const CLOSING_ISSUES: &str = r"
query closingIssues($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      closingIssuesReferences(first: 100, userLinkedOnly: false) {
        nodes {
          number
        }
      }
    }
  }
}";

const PROJECT_ID_ORGANIZATION: &str = r"
query getProject($projectOwnerName: String!, $projectNumber: Int!) {
  organization(login: $projectOwnerName) {
    projectV2(number: $projectNumber) {
      id
    }
  }
}";

const PROJECT_ID_USER: &str = r"
query getProject($projectOwnerName: String!, $projectNumber: Int!) {
  user(login: $projectOwnerName) {
    projectV2(number: $projectNumber) {
      id
    }
  }
}";

/// Select the project-id document for an owner kind.
pub const fn project_id(owner_kind: OwnerKind) -> &'static str {
    match owner_kind {
        OwnerKind::Organization => PROJECT_ID_ORGANIZATION,
        OwnerKind::User => PROJECT_ID_USER,
    }
}

/// All fields of a project with type-specific sub-selections.
pub const PROJECT_FIELDS: &str = r"
query getProjectFields($projectId: ID!) {
  node(id: $projectId) {
    ... on ProjectV2 {
      fields(first: 100) {
        nodes {
          ... on ProjectV2Field {
            id
            name
            dataType
          }
          ... on ProjectV2IterationField {
            id
            name
            dataType
            configuration {
              iterations {
                startDate
                id
              }
            }
          }
          ... on ProjectV2SingleSelectField {
            id
            name
            dataType
            options {
              id
              name
            }
          }
        }
      }
    }
  }
}";

/// Link content to a project; returns the (possibly pre-existing) item.
pub const ADD_ITEM: &str = r"
mutation addIssueToProject($input: AddProjectV2ItemByIdInput!) {
  addProjectV2ItemById(input: $input) {
    item {
      id
    }
  }
}";

/// Set one field value on a project item.
pub const UPDATE_ITEM_FIELD: &str = r"
mutation updateProjectV2ItemFieldValue($input: UpdateProjectV2ItemFieldValueInput!) {
  updateProjectV2ItemFieldValue(input: $input) {
    projectV2Item {
      id
    }
  }
}";
