//! Stock registrations for the Azure resource types the pipeline knows
//! how to hand to the downstream cost engine.
//!
//! Purely-organizational resources (virtual networks, identities,
//! security groups) are registered free; compute and storage types carry
//! a pricing path. Managed disks go through the core-resource path as a
//! composite unit.

use super::{Registration, Registry, RegistryBuilder};
use crate::normalize::{CoreResource, Resource};

/// Composite unit for a managed disk: type and size drive its cost.
#[derive(Debug, Clone)]
pub struct ManagedDisk {
    /// Display address of the disk.
    pub address: String,
    /// Disk SKU (e.g. `Premium_LRS`).
    pub disk_type: String,
    /// Provisioned size in GB.
    pub size_gb: Option<f64>,
}

impl CoreResource for ManagedDisk {
    fn resource_type(&self) -> &str {
        "azurerm_managed_disk"
    }

    fn address(&self) -> &str {
        &self.address
    }
}

/// Builds the stock registry shared by all pipeline runs.
#[must_use]
pub fn default_registry() -> Registry {
    let mut builder = RegistryBuilder::new();

    // Free resources still surface their ARM identifiers so the caller
    // can correlate them with billing data.
    for free_type in [
        "azurerm_key_vault",
        "azurerm_mssql_server",
        "azurerm_network_interface",
        "azurerm_network_security_group",
        "azurerm_user_assigned_identity",
        "azurerm_virtual_network",
    ] {
        builder = builder.register(
            free_type,
            Registration::free().with_cloud_resource_ids(|record| vec![record.provider_id.clone()]),
        );
    }

    for priced_type in [
        "azurerm_app_service",
        "azurerm_application_insights",
        "azurerm_function_app",
        "azurerm_kubernetes_cluster",
        "azurerm_linux_virtual_machine",
        "azurerm_linux_virtual_machine_scale_set",
        "azurerm_log_analytics_workspace",
        "azurerm_mssql_database",
        "azurerm_postgresql_flexible_server",
        "azurerm_public_ip",
        "azurerm_redis_cache",
        "azurerm_service_plan",
        "azurerm_storage_account",
        "azurerm_windows_virtual_machine",
        "azurerm_windows_virtual_machine_scale_set",
    ] {
        builder = builder.register(
            priced_type,
            Registration::priced(|record, _usage| Some(Resource::costable(record)))
                .with_cloud_resource_ids(|record| vec![record.provider_id.clone()]),
        );
    }

    builder
        .register(
            "azurerm_managed_disk",
            Registration::core(|record| {
                Some(Box::new(ManagedDisk {
                    address: record.address.clone(),
                    disk_type: record
                        .str_property("sku.name")
                        .unwrap_or("Standard_LRS")
                        .to_string(),
                    size_gb: record.f64_property("properties.diskSizeGB"),
                }) as Box<dyn CoreResource>)
            })
            .with_cloud_resource_ids(|record| vec![record.provider_id.clone()]),
        )
        .build()
}
