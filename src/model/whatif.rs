//! What-if result wire model.
//!
//! These types deserialize the JSON response of an Azure Resource Manager
//! `deployments/whatIf` call. Modeled after the schema of the AzureRM REST
//! API, see:
//! <https://learn.microsoft.com/en-us/rest/api/resources/deployments/what-if-at-subscription-scope>

use serde::{Deserialize, Serialize};

use super::delta::PropertyDelta;
use super::document::LazyDocument;

/// Status value reported by a successful what-if operation.
pub const SUCCESS_STATUS: &str = "Succeeded";

/// Top-level envelope of a what-if operation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Overall operation status. Anything other than [`SUCCESS_STATUS`]
    /// rejects the whole result.
    pub status: String,
    /// Structured error detail, populated on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<WhatIfErrorDetail>,
    /// Ordered per-resource changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ResourceChange>,
}

/// Structured error detail from a failed what-if operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfErrorDetail {
    /// Provider error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
    /// Target of the error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One resource's transition within a what-if result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceChange {
    /// Provider-native resource identifier.
    pub resource_id: String,
    /// Classification of the change.
    pub change_type: ChangeType,
    /// Reason the change is unsupported, populated only when
    /// `change_type` is [`ChangeType::Unsupported`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsupported_reason: Option<String>,
    /// Root-level property deltas; each root carries its own child tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delta: Vec<PropertyDelta>,
    /// Resource state before the deployment, absent for new resources.
    #[serde(default, skip_serializing_if = "LazyDocument::is_absent")]
    pub before: LazyDocument,
    /// Resource state after the deployment, absent for deleted resources.
    #[serde(default, skip_serializing_if = "LazyDocument::is_absent")]
    pub after: LazyDocument,
}

/// Classification of a resource-level change.
///
/// This is a closed enumeration on the wire, but unrecognized values must
/// not crash parsing: they round-trip unchanged through [`ChangeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeType {
    /// The resource will be created.
    Create,
    /// The resource will be deleted.
    Delete,
    /// The resource will be deployed (existence unknown beforehand).
    Deploy,
    /// The resource is ignored by the deployment.
    Ignore,
    /// The resource will be modified.
    Modify,
    /// The resource is unchanged.
    NoChange,
    /// The resource type is not supported by the what-if engine.
    Unsupported,
    /// An unrecognized change type, surfaced unchanged.
    Other(String),
}

impl From<String> for ChangeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Create" => Self::Create,
            "Delete" => Self::Delete,
            "Deploy" => Self::Deploy,
            "Ignore" => Self::Ignore,
            "Modify" => Self::Modify,
            "NoChange" => Self::NoChange,
            "Unsupported" => Self::Unsupported,
            _ => Self::Other(value),
        }
    }
}

impl From<ChangeType> for String {
    fn from(value: ChangeType) -> Self {
        match value {
            ChangeType::Create => Self::from("Create"),
            ChangeType::Delete => Self::from("Delete"),
            ChangeType::Deploy => Self::from("Deploy"),
            ChangeType::Ignore => Self::from("Ignore"),
            ChangeType::Modify => Self::from("Modify"),
            ChangeType::NoChange => Self::from("NoChange"),
            ChangeType::Unsupported => Self::from("Unsupported"),
            ChangeType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Delete => write!(f, "Delete"),
            Self::Deploy => write!(f, "Deploy"),
            Self::Ignore => write!(f, "Ignore"),
            Self::Modify => write!(f, "Modify"),
            Self::NoChange => write!(f, "NoChange"),
            Self::Unsupported => write!(f, "Unsupported"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl WhatIfResult {
    /// Returns true if the what-if operation succeeded.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Returns the formatted error detail, if any.
    #[must_use]
    pub fn error_detail(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| format!("{}: {}", e.code, e.message))
    }
}
