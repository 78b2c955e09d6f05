//! Domain errors for the relsync system.

use thiserror::Error;

/// Domain-level errors that can occur while resolving releases and syncing
/// issue metadata.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The host answered that the requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The host answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A GraphQL response carried an `errors` array or lacked its `data`.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// No field with the requested name exists on the project board.
    #[error("Field '{field}' not found on project {project}")]
    FieldNotFound { field: String, project: String },

    /// The field's data type has no known mutation payload key.
    #[error(
        "Unsupported field data type: {0}. Must be one of TEXT, NUMBER, DATE, ITERATION, SINGLE_SELECT"
    )]
    UnsupportedFieldType(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl DomainError {
    /// Whether this error is a schema/contract failure scoped to a single
    /// project-field update.
    ///
    /// Callers iterating over many issues may log these and continue; every
    /// other variant aborts the run.
    pub const fn is_field_contract_error(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. } | Self::UnsupportedFieldType(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::SerializationError(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
