//! Pricing registry contract.
//!
//! The registry maps canonical resource types to the cost-computation
//! hooks of the downstream engine. It is constructed once at process
//! start, is immutable afterwards, and is passed explicitly into the
//! resource builder, so concurrent pipeline runs share it without
//! locking.
//!
//! A missing entry is never an error: unregistered types become skipped
//! outcomes and the run continues.

mod defaults;

pub use defaults::{default_registry, ManagedDisk};

use std::collections::HashMap;

use crate::normalize::{CoreResource, Resource, ResourceRecord};
use crate::usage::UsageRecord;

/// Produces a composite core costable unit from a record.
pub type CoreResourceFn =
    Box<dyn Fn(&ResourceRecord) -> Option<Box<dyn CoreResource>> + Send + Sync>;

/// Produces a costable unit from a record and its usage inputs.
pub type PriceFn =
    Box<dyn Fn(&ResourceRecord, Option<&UsageRecord>) -> Option<Resource> + Send + Sync>;

/// Declares the cloud-resource sub-identifiers relevant to a record.
pub type CloudResourceIdFn = Box<dyn Fn(&ResourceRecord) -> Vec<String> + Send + Sync>;

/// Registration entry for one canonical resource type.
///
/// Exactly one of `core_resource_fn`/`price_fn` is expected per entry;
/// `core_resource_fn` takes precedence when both exist.
#[derive(Default)]
pub struct Registration {
    /// True when the resource type never incurs cost.
    pub no_price: bool,
    /// Core-resource path, if the type has one.
    pub core_resource_fn: Option<CoreResourceFn>,
    /// Usage-sensitive pricing path, if the type has one.
    pub price_fn: Option<PriceFn>,
    /// Cloud-resource sub-identifier hook.
    pub cloud_resource_id_fn: Option<CloudResourceIdFn>,
}

/// Immutable lookup from canonical resource type to registration entry.
#[derive(Default)]
pub struct Registry {
    items: HashMap<String, Registration>,
}

/// Builder for constructing a [`Registry`] at process start.
#[derive(Default)]
pub struct RegistryBuilder {
    items: HashMap<String, Registration>,
}

impl Registration {
    /// Creates a no-price registration.
    #[must_use]
    pub fn free() -> Self {
        Self {
            no_price: true,
            ..Self::default()
        }
    }

    /// Creates a registration with a core-resource function.
    #[must_use]
    pub fn core(
        f: impl Fn(&ResourceRecord) -> Option<Box<dyn CoreResource>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            core_resource_fn: Some(Box::new(f)),
            ..Self::default()
        }
    }

    /// Creates a registration with a usage-sensitive price function.
    #[must_use]
    pub fn priced(
        f: impl Fn(&ResourceRecord, Option<&UsageRecord>) -> Option<Resource> + Send + Sync + 'static,
    ) -> Self {
        Self {
            price_fn: Some(Box::new(f)),
            ..Self::default()
        }
    }

    /// Attaches a cloud-resource sub-identifier hook.
    #[must_use]
    pub fn with_cloud_resource_ids(
        mut self,
        f: impl Fn(&ResourceRecord) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.cloud_resource_id_fn = Some(Box::new(f));
        self
    }

    /// Evaluates the cloud-resource sub-identifier hook for a record.
    #[must_use]
    pub fn cloud_resource_ids(&self, record: &ResourceRecord) -> Vec<String> {
        self.cloud_resource_id_fn
            .as_ref()
            .map(|f| f(record))
            .unwrap_or_default()
    }
}

impl Registry {
    /// Looks up the registration entry for a canonical type.
    #[must_use]
    pub fn get(&self, canonical_type: &str) -> Option<&Registration> {
        self.items.get(canonical_type)
    }

    /// Returns true if a canonical type is registered.
    #[must_use]
    pub fn contains(&self, canonical_type: &str) -> bool {
        self.items.contains_key(canonical_type)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry for a canonical type.
    #[must_use]
    pub fn register(mut self, canonical_type: impl Into<String>, entry: Registration) -> Self {
        self.items.insert(canonical_type.into(), entry);
        self
    }

    /// Finalizes the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry { items: self.items }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("no_price", &self.no_price)
            .field("core_resource_fn", &self.core_resource_fn.is_some())
            .field("price_fn", &self.price_fn.is_some())
            .field("cloud_resource_id_fn", &self.cloud_resource_id_fn.is_some())
            .finish()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LazyDocument;

    #[test]
    fn test_builder_registers_entries() {
        let registry = RegistryBuilder::new()
            .register("azurerm_virtual_network", Registration::free())
            .register(
                "azurerm_public_ip",
                Registration::priced(|record, _| Some(Resource::costable(record))),
            )
            .build();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("azurerm_virtual_network"));
        assert!(registry.get("azurerm_virtual_network").is_some_and(|r| r.no_price));
        assert!(!registry.contains("azurerm_missing"));
    }

    #[test]
    fn test_cloud_resource_ids_default_to_empty() {
        let entry = Registration::free();
        let record = ResourceRecord::new("azurerm_virtual_network", "/vnet1", LazyDocument::absent());
        assert!(entry.cloud_resource_ids(&record).is_empty());

        let entry = Registration::free()
            .with_cloud_resource_ids(|record| vec![record.provider_id.clone()]);
        assert_eq!(entry.cloud_resource_ids(&record), vec![String::from("/vnet1")]);
    }
}
