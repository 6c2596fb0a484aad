//! Change normalization: what-if envelope to per-resource outcomes.
//!
//! The normalizer parses the envelope, gates on the operation status,
//! and walks the changes in order. For each change it materializes the
//! before/after documents, translates their ARM types, and hands the
//! resulting records to the resource builder. Changes are independent
//! and processed to completion one at a time; a fatal error discards all
//! partially-built output.

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::model::{ChangeType, LazyDocument, PropertyDelta, ResourceChange, WhatIfResult};
use crate::registry::Registry;
use crate::translate::TypeTranslator;
use crate::usage::UsageMap;

use super::builder::build_partial_resource;
use super::outcome::PartialResource;
use super::record::ResourceRecord;

/// One fully normalized resource change.
#[derive(Debug)]
pub struct NormalizedChange {
    /// Provider-native resource identifier.
    pub resource_id: String,
    /// Classification of the change.
    pub change_type: ChangeType,
    /// Current-state outcome, absent when the change has no "after" side.
    pub partial_resource: Option<PartialResource>,
    /// Prior-state outcome, absent when the change has no "before" side.
    pub partial_past_resource: Option<PartialResource>,
    /// Root-level property deltas for change-impact reporting.
    pub delta: Vec<PropertyDelta>,
}

/// Normalizer for what-if operation results.
#[derive(Debug)]
pub struct Normalizer<'r> {
    registry: &'r Registry,
    translator: TypeTranslator,
}

impl<'r> Normalizer<'r> {
    /// Creates a normalizer backed by the given registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            translator: TypeTranslator::new(),
        }
    }

    /// Parses a what-if payload and normalizes every change, in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope fails to parse, the operation
    /// status is not successful, or a resource payload is malformed. No
    /// partial output survives a failure.
    pub fn parse(&self, payload: &[u8], usage: &UsageMap) -> Result<Vec<NormalizedChange>> {
        let result: WhatIfResult = serde_json::from_slice(payload)
            .map_err(|e| PlanError::unmarshal(e.to_string()))?;

        if !result.is_successful() {
            return Err(PlanError::OperationFailed {
                status: result.status.clone(),
                detail: result.error_detail(),
            }
            .into());
        }

        debug!("Normalizing {} what-if changes", result.changes.len());

        result
            .changes
            .into_iter()
            .map(|change| self.normalize_change(change, usage))
            .collect()
    }

    /// Normalizes one resource change into its before/after outcomes.
    ///
    /// A change with neither a populated before nor after document is
    /// legal and contributes nothing downstream.
    fn normalize_change(&self, change: ResourceChange, usage: &UsageMap) -> Result<NormalizedChange> {
        let partial_resource = self.normalize_side(&change, &change.after, usage)?;
        let partial_past_resource = self.normalize_side(&change, &change.before, usage)?;

        Ok(NormalizedChange {
            resource_id: change.resource_id,
            change_type: change.change_type,
            partial_resource,
            partial_past_resource,
            delta: change.delta,
        })
    }

    /// Normalizes one side of a change. A side whose document carries no
    /// identifier is absent and produces no record.
    fn normalize_side(
        &self,
        change: &ResourceChange,
        document: &LazyDocument,
        usage: &UsageMap,
    ) -> Result<Option<PartialResource>> {
        let Some(resource_id) = document.str_field("id").filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        let record = self.resource_record(change, document, resource_id)?;
        let usage_record = usage.get(&record.address);
        Ok(Some(build_partial_resource(
            self.registry,
            record,
            usage_record,
        )))
    }

    /// Extracts a typed record from a resource document.
    ///
    /// A document with an identifier but no type field is a malformed
    /// payload and aborts the run. An ARM type with no canonical mapping
    /// is soft: the record keeps the ARM-native type and the builder
    /// marks it unsupported.
    fn resource_record(
        &self,
        change: &ResourceChange,
        document: &LazyDocument,
        resource_id: &str,
    ) -> Result<ResourceRecord> {
        let Some(arm_type) = document.str_field("type").filter(|t| !t.is_empty()) else {
            return Err(PlanError::malformed(
                &change.resource_id,
                "document is missing its 'type' field",
            )
            .into());
        };

        let canonical_type = self.translator.translate(arm_type, document).unwrap_or_else(|| {
            debug!("No canonical mapping for AzureRM type '{arm_type}'");
            String::from(arm_type)
        });

        Ok(ResourceRecord::new(
            canonical_type,
            resource_id,
            document.clone(),
        ))
    }
}
