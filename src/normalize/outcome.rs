//! Per-resource pipeline outcomes.
//!
//! Every normalized record ends up as exactly one [`PartialResource`]:
//! a priced unit, a core costable unit, a marked-free resource, or an
//! explicitly skipped one. Unsupported resources are a normal, expected
//! outcome, never an error.

use std::collections::HashMap;

use serde::Serialize;

use super::record::ResourceRecord;

/// Skip reason for resources with no registry entry.
pub const SKIP_NOT_SUPPORTED: &str = "This resource is not currently supported";

/// Skip reason for registered resources that incur no cost.
pub const SKIP_FREE_RESOURCE: &str = "Free resource";

/// A costable (or explicitly skipped) resource unit, ready for the
/// downstream cost engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resource {
    /// Display name, derived from the resource's address.
    pub name: String,
    /// Canonical resource type.
    pub resource_type: String,
    /// Tags carried on the resource, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    /// True when the resource is excluded from cost computation.
    pub is_skipped: bool,
    /// True when the resource is registered as free.
    pub no_price: bool,
    /// Human-readable reason for skipping, if skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_message: Option<String>,
    /// Which usage inputs were consulted, for usage-sensitive resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_summary: Option<HashMap<String, bool>>,
}

/// A composite costable unit produced by a registry core-resource
/// function. The concrete shape is the downstream engine's concern;
/// the pipeline treats it as opaque.
pub trait CoreResource: std::fmt::Debug + Send + Sync {
    /// Canonical resource type of this unit.
    fn resource_type(&self) -> &str;
    /// Display address of the originating resource.
    fn address(&self) -> &str;
}

/// Outcome of the resource builder for one normalized record.
#[derive(Debug)]
pub struct PartialResource {
    /// The normalized record this outcome was built from.
    pub record: ResourceRecord,
    /// Priced, free, or skipped unit.
    pub resource: Option<Resource>,
    /// Core costable unit, populated instead of `resource` when the
    /// registry declares a core-resource path.
    pub core_resource: Option<Box<dyn CoreResource>>,
    /// Cloud-resource sub-identifiers the registry declares relevant.
    pub cloud_resource_ids: Vec<String>,
}

impl Resource {
    /// Creates a costable resource for the given record.
    #[must_use]
    pub fn costable(record: &ResourceRecord) -> Self {
        Self {
            name: record.address.clone(),
            resource_type: record.canonical_type.clone(),
            tags: record.tags(),
            ..Self::default()
        }
    }

    /// Creates a free (no-price) resource for the given record.
    #[must_use]
    pub fn free(record: &ResourceRecord) -> Self {
        Self {
            name: record.address.clone(),
            resource_type: record.canonical_type.clone(),
            tags: record.tags(),
            is_skipped: true,
            no_price: true,
            skip_message: Some(String::from(SKIP_FREE_RESOURCE)),
            ..Self::default()
        }
    }

    /// Creates a skipped resource with the given reason.
    #[must_use]
    pub fn skipped(record: &ResourceRecord, reason: &str) -> Self {
        Self {
            name: record.address.clone(),
            resource_type: record.canonical_type.clone(),
            is_skipped: true,
            skip_message: Some(String::from(reason)),
            ..Self::default()
        }
    }
}

impl PartialResource {
    /// Returns the canonical type this outcome originates from.
    #[must_use]
    pub fn canonical_type(&self) -> &str {
        &self.record.canonical_type
    }

    /// Returns the display name of this outcome.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.record.display_name()
    }

    /// Returns true if the resource was skipped (unsupported or free).
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.resource.as_ref().is_some_and(|r| r.is_skipped)
    }

    /// Returns true if the resource is registered as free.
    #[must_use]
    pub fn is_no_price(&self) -> bool {
        self.resource.as_ref().is_some_and(|r| r.no_price)
    }

    /// Returns the skip reason, if the resource was skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        self.resource.as_ref()?.skip_message.as_deref()
    }
}
