//! Normalized resource records.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::LazyDocument;

/// A typed resource record extracted from one side of a resource change.
///
/// Created per before/after side of a change that carries a non-empty
/// identifier; never created for absent sides (a Delete has no "after",
/// a Create has no "before").
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    /// Canonical registry type. When no canonical mapping exists this
    /// keeps the ARM-native type string, which the registry never
    /// contains, so the builder emits an unsupported outcome.
    pub canonical_type: String,
    /// Provider-native resource identifier.
    pub provider_id: String,
    /// Display address of the resource.
    pub address: String,
    /// Materialized view of the resource document.
    pub document: LazyDocument,
}

impl ResourceRecord {
    /// Creates a record for the given canonical type and ARM identifier.
    /// The ARM identifier doubles as the display address.
    #[must_use]
    pub fn new(
        canonical_type: impl Into<String>,
        provider_id: impl Into<String>,
        document: LazyDocument,
    ) -> Self {
        let provider_id = provider_id.into();
        Self {
            canonical_type: canonical_type.into(),
            address: provider_id.clone(),
            provider_id,
            document,
        }
    }

    /// Returns the short display name: the last segment of the ARM
    /// identifier path.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.provider_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.provider_id)
    }

    /// Extracts the resource's tag map from its document, if present.
    #[must_use]
    pub fn tags(&self) -> Option<HashMap<String, String>> {
        let tags = self.document.field("tags")?.as_object()?;
        Some(
            tags.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect(),
        )
    }

    /// Returns a string property from the resource document by dotted path.
    #[must_use]
    pub fn str_property(&self, path: &str) -> Option<&str> {
        self.document.query(path).and_then(Value::as_str)
    }

    /// Returns a numeric property from the resource document by dotted path.
    #[must_use]
    pub fn f64_property(&self, path: &str) -> Option<f64> {
        self.document.query(path).and_then(Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_last_id_segment() {
        let record = ResourceRecord::new(
            "azurerm_storage_account",
            "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/stacct1",
            LazyDocument::absent(),
        );
        assert_eq!(record.display_name(), "stacct1");
        assert_eq!(record.address, record.provider_id);
    }

    #[test]
    fn test_tags_extracted_from_document() {
        let doc = LazyDocument::from_json(r#"{"tags":{"env":"prod","team":"infra"}}"#)
            .expect("valid json");
        let record = ResourceRecord::new("azurerm_virtual_network", "/vnet1", doc);
        let tags = record.tags().expect("tags");
        assert_eq!(tags.get("env").map(String::as_str), Some("prod"));
        assert_eq!(tags.len(), 2);
    }
}
