//! Project board (Projects V2) domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};

/// The kind of account that owns a repository.
///
/// The GraphQL schema exposes `projectV2` under different root fields for
/// organizations and users, so the project-id query is selected by this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    /// An organization account.
    Organization,
    /// A personal user account.
    User,
}

impl OwnerKind {
    /// Returns the GraphQL root field name for this owner kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::User => "user",
        }
    }

    /// Parse the REST `owner.type` value (`"Organization"` / `"User"`).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "organization" => Some(Self::Organization),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Data type of a project field, as reported by the GraphQL API.
///
/// Only five types can be written through `updateProjectV2ItemFieldValue`.
/// Everything else is kept verbatim in [`FieldDataType::Other`] so the
/// failure surfaces when a mutation key is requested, not at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldDataType {
    Text,
    Number,
    Date,
    Iteration,
    SingleSelect,
    /// Any other type (e.g., `ASSIGNEES`, `LABELS`, `MILESTONE`).
    Other(String),
}

impl FieldDataType {
    /// Returns the GraphQL enum value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Iteration => "ITERATION",
            Self::SingleSelect => "SINGLE_SELECT",
            Self::Other(other) => other,
        }
    }

    /// Select the mutation payload key for this data type.
    ///
    /// This is a pure function of the data type. Unknown types are a hard
    /// error, never a silent default.
    pub fn mutation_key(&self) -> DomainResult<MutationKey> {
        match self {
            Self::Text => Ok(MutationKey::Text),
            Self::Number => Ok(MutationKey::Number),
            Self::Date => Ok(MutationKey::Date),
            Self::Iteration => Ok(MutationKey::IterationId),
            Self::SingleSelect => Ok(MutationKey::SingleSelectOptionId),
            Self::Other(other) => Err(DomainError::UnsupportedFieldType(other.clone())),
        }
    }
}

impl From<String> for FieldDataType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TEXT" => Self::Text,
            "NUMBER" => Self::Number,
            "DATE" => Self::Date,
            "ITERATION" => Self::Iteration,
            "SINGLE_SELECT" => Self::SingleSelect,
            _ => Self::Other(value),
        }
    }
}

impl From<FieldDataType> for String {
    fn from(value: FieldDataType) -> Self {
        value.as_str().to_string()
    }
}

/// Key of the `ProjectV2FieldValue` input object to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Text,
    Number,
    Date,
    IterationId,
    SingleSelectOptionId,
}

impl MutationKey {
    /// Returns the input object key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::IterationId => "iterationId",
            Self::SingleSelectOptionId => "singleSelectOptionId",
        }
    }
}

/// An option of a single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Option node id.
    pub id: String,
    /// Display name (e.g., "Todo", "In Progress").
    pub name: String,
}

/// A single iteration of an iteration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    /// Iteration id.
    pub id: String,
    /// ISO date the iteration starts on.
    #[serde(default)]
    pub start_date: Option<String>,
}

/// Configuration block of an iteration field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationConfiguration {
    /// Active and upcoming iterations.
    #[serde(default)]
    pub iterations: Vec<Iteration>,
}

/// A typed column on a project board.
///
/// Fields are looked up by `name`; the `id` is only used in the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectField {
    /// Field node id.
    pub id: String,
    /// Human-readable field name (e.g., "Status").
    pub name: String,
    /// Field data type.
    pub data_type: FieldDataType,
    /// Options, present only for single-select fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Iteration configuration, present only for iteration fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<IterationConfiguration>,
}

/// A resolved `{key: value}` pair ready for the update mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValueInput {
    /// Which input key to populate.
    pub key: MutationKey,
    /// Resolved value (an option id for single-select fields).
    pub value: String,
}

impl FieldValueInput {
    /// Create a new field value input.
    pub fn new(key: MutationKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Render the `ProjectV2FieldValue` input object.
    ///
    /// `number` fields take a GraphQL `Float`; numeric strings are sent as
    /// JSON numbers, anything else is passed through for the server to reject.
    pub fn to_json(&self) -> Value {
        let value = match self.key {
            MutationKey::Number => self
                .value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|n| serde_json::Number::from_f64(n).map(Value::Number))
                .unwrap_or_else(|| Value::String(self.value.clone())),
            _ => Value::String(self.value.clone()),
        };
        let mut object = serde_json::Map::new();
        object.insert(self.key.as_str().to_string(), value);
        Value::Object(object)
    }
}
