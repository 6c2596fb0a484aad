//! Resource builder: turns a normalized record into a pipeline outcome
//! by consulting the pricing registry.

use tracing::debug;

use crate::registry::Registry;
use crate::usage::UsageRecord;

use super::outcome::{PartialResource, Resource, SKIP_NOT_SUPPORTED};
use super::record::ResourceRecord;

/// Builds the outcome for one normalized record.
///
/// Registry dispatch, in precedence order: a no-price entry yields a
/// free-resource skip; a core-resource function yields a core unit; a
/// price function yields a costable unit with an estimation summary when
/// usage inputs exist. Anything else (no entry, or a hook that declines
/// the record) yields an unsupported skip. None of these paths fail.
#[must_use]
pub fn build_partial_resource(
    registry: &Registry,
    record: ResourceRecord,
    usage: Option<&UsageRecord>,
) -> PartialResource {
    if let Some(entry) = registry.get(&record.canonical_type) {
        if entry.no_price {
            let cloud_resource_ids = entry.cloud_resource_ids(&record);
            let resource = Resource::free(&record);
            return PartialResource {
                record,
                resource: Some(resource),
                core_resource: None,
                cloud_resource_ids,
            };
        }

        if let Some(core_fn) = &entry.core_resource_fn {
            if let Some(core) = core_fn(&record) {
                let cloud_resource_ids = entry.cloud_resource_ids(&record);
                return PartialResource {
                    record,
                    resource: None,
                    core_resource: Some(core),
                    cloud_resource_ids,
                };
            }
        } else if let Some(price_fn) = &entry.price_fn
            && let Some(mut resource) = price_fn(&record, usage)
        {
            if let Some(usage_record) = usage {
                resource.estimation_summary = Some(usage_record.calc_estimation_summary());
            }
            let cloud_resource_ids = entry.cloud_resource_ids(&record);
            return PartialResource {
                record,
                resource: Some(resource),
                core_resource: None,
                cloud_resource_ids,
            };
        }
    }

    debug!(
        "No registry entry for '{}', marking '{}' as skipped",
        record.canonical_type, record.address
    );
    let resource = Resource::skipped(&record, SKIP_NOT_SUPPORTED);
    PartialResource {
        record,
        resource: Some(resource),
        core_resource: None,
        cloud_resource_ids: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LazyDocument;
    use crate::registry::{Registration, RegistryBuilder};
    use crate::usage::UsageRecord;
    use serde_json::json;

    fn record(canonical_type: &str) -> ResourceRecord {
        ResourceRecord::new(canonical_type, "/subscriptions/s1/things/t1", LazyDocument::absent())
    }

    #[test]
    fn test_registry_miss_is_skipped_not_fatal() {
        let registry = RegistryBuilder::new().build();
        let outcome = build_partial_resource(&registry, record("Microsoft.Foo/bar"), None);
        assert!(outcome.is_skipped());
        assert!(!outcome.is_no_price());
        assert_eq!(outcome.skip_reason(), Some(SKIP_NOT_SUPPORTED));
    }

    #[test]
    fn test_no_price_entry_is_free_with_cloud_ids() {
        let registry = RegistryBuilder::new()
            .register(
                "azurerm_virtual_network",
                Registration::free()
                    .with_cloud_resource_ids(|r| vec![r.provider_id.clone()]),
            )
            .build();

        let outcome = build_partial_resource(&registry, record("azurerm_virtual_network"), None);
        assert!(outcome.is_skipped());
        assert!(outcome.is_no_price());
        assert_eq!(outcome.skip_reason(), Some("Free resource"));
        assert_eq!(outcome.cloud_resource_ids, vec![String::from("/subscriptions/s1/things/t1")]);
    }

    #[test]
    fn test_price_fn_attaches_estimation_summary() {
        let registry = RegistryBuilder::new()
            .register(
                "azurerm_linux_virtual_machine",
                Registration::priced(|r, _| Some(Resource::costable(r))),
            )
            .build();

        let usage = UsageRecord::new("/subscriptions/s1/things/t1")
            .with_item("monthly_hrs", json!(730));
        let outcome = build_partial_resource(
            &registry,
            record("azurerm_linux_virtual_machine"),
            Some(&usage),
        );

        assert!(!outcome.is_skipped());
        let resource = outcome.resource.as_ref().expect("priced resource");
        let summary = resource.estimation_summary.as_ref().expect("summary");
        assert_eq!(summary.get("monthly_hrs"), Some(&true));
    }

    #[test]
    fn test_core_fn_takes_precedence_over_price_fn() {
        #[derive(Debug)]
        struct Unit(String);
        impl crate::normalize::CoreResource for Unit {
            fn resource_type(&self) -> &str {
                "azurerm_managed_disk"
            }
            fn address(&self) -> &str {
                &self.0
            }
        }

        let mut entry = Registration::core(|r| {
            Some(Box::new(Unit(r.address.clone())) as Box<dyn crate::normalize::CoreResource>)
        });
        entry.price_fn = Some(Box::new(|r, _| Some(Resource::costable(r))));

        let registry = RegistryBuilder::new()
            .register("azurerm_managed_disk", entry)
            .build();

        let outcome = build_partial_resource(&registry, record("azurerm_managed_disk"), None);
        assert!(outcome.core_resource.is_some());
        assert!(outcome.resource.is_none());
    }

    #[test]
    fn test_declining_price_fn_falls_back_to_skip() {
        let registry = RegistryBuilder::new()
            .register("azurerm_public_ip", Registration::priced(|_, _| None))
            .build();

        let outcome = build_partial_resource(&registry, record("azurerm_public_ip"), None);
        assert!(outcome.is_skipped());
        assert_eq!(outcome.skip_reason(), Some(SKIP_NOT_SUPPORTED));
    }
}
