//! Type translation from ARM resource types to canonical registry types.
//!
//! The pricing registry is keyed by the provider-agnostic resource types
//! used across cost-estimation backends, not by ARM's native type strings.
//! Translation is a pure function of the ARM type and the resource
//! document: where a single ARM type maps to multiple canonical types
//! depending on configuration shape (a virtual machine's OS, a web site's
//! `kind`), fields of the document disambiguate.
//!
//! A missing mapping is not an error. The caller treats it as an
//! unsupported resource and the pipeline keeps going.

use crate::model::LazyDocument;

/// ARM types with a single, shape-independent canonical equivalent.
/// Keys are lowercase; ARM type strings are case-insensitive.
const DIRECT_MAPPINGS: &[(&str, &str)] = &[
    ("microsoft.cache/redis", "azurerm_redis_cache"),
    ("microsoft.compute/disks", "azurerm_managed_disk"),
    ("microsoft.containerservice/managedclusters", "azurerm_kubernetes_cluster"),
    ("microsoft.dbforpostgresql/flexibleservers", "azurerm_postgresql_flexible_server"),
    ("microsoft.insights/components", "azurerm_application_insights"),
    ("microsoft.keyvault/vaults", "azurerm_key_vault"),
    ("microsoft.managedidentity/userassignedidentities", "azurerm_user_assigned_identity"),
    ("microsoft.network/networkinterfaces", "azurerm_network_interface"),
    ("microsoft.network/networksecuritygroups", "azurerm_network_security_group"),
    ("microsoft.network/publicipaddresses", "azurerm_public_ip"),
    ("microsoft.network/virtualnetworks", "azurerm_virtual_network"),
    ("microsoft.operationalinsights/workspaces", "azurerm_log_analytics_workspace"),
    ("microsoft.sql/servers", "azurerm_mssql_server"),
    ("microsoft.sql/servers/databases", "azurerm_mssql_database"),
    ("microsoft.storage/storageaccounts", "azurerm_storage_account"),
    ("microsoft.web/serverfarms", "azurerm_service_plan"),
];

/// Translator from ARM resource types to canonical registry types.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeTranslator;

impl TypeTranslator {
    /// Creates a new translator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Translates an ARM resource type to its canonical registry type,
    /// consulting the resource document where the ARM type alone is
    /// ambiguous. Returns `None` when no canonical mapping exists.
    #[must_use]
    pub fn translate(&self, arm_type: &str, document: &LazyDocument) -> Option<String> {
        let key = arm_type.to_ascii_lowercase();

        match key.as_str() {
            "microsoft.compute/virtualmachines" => {
                Some(String::from(if Self::is_windows(document) {
                    "azurerm_windows_virtual_machine"
                } else {
                    "azurerm_linux_virtual_machine"
                }))
            }
            "microsoft.compute/virtualmachinescalesets" => {
                Some(String::from(if Self::is_windows(document) {
                    "azurerm_windows_virtual_machine_scale_set"
                } else {
                    "azurerm_linux_virtual_machine_scale_set"
                }))
            }
            "microsoft.web/sites" => Some(String::from(
                if document
                    .str_field("kind")
                    .is_some_and(|kind| kind.to_ascii_lowercase().contains("functionapp"))
                {
                    "azurerm_function_app"
                } else {
                    "azurerm_app_service"
                },
            )),
            _ => DIRECT_MAPPINGS
                .iter()
                .find(|(arm, _)| *arm == key)
                .map(|(_, canonical)| String::from(*canonical)),
        }
    }

    /// Probes a compute document for a Windows OS configuration.
    fn is_windows(document: &LazyDocument) -> bool {
        if document
            .query("properties.osProfile.windowsConfiguration")
            .is_some()
        {
            return true;
        }
        document
            .query("properties.storageProfile.osDisk.osType")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|os| os.eq_ignore_ascii_case("windows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> LazyDocument {
        LazyDocument::from_json(json).expect("valid json")
    }

    #[test]
    fn test_direct_mapping() {
        let translator = TypeTranslator::new();
        assert_eq!(
            translator
                .translate("Microsoft.ManagedIdentity/userAssignedIdentities", &doc("{}"))
                .as_deref(),
            Some("azurerm_user_assigned_identity")
        );
    }

    #[test]
    fn test_arm_types_are_case_insensitive() {
        let translator = TypeTranslator::new();
        assert_eq!(
            translator
                .translate("microsoft.storage/storageAccounts", &doc("{}"))
                .as_deref(),
            Some("azurerm_storage_account")
        );
    }

    #[test]
    fn test_virtual_machine_disambiguated_by_os_profile() {
        let translator = TypeTranslator::new();
        let windows = doc(r#"{"properties":{"osProfile":{"windowsConfiguration":{}}}}"#);
        let linux = doc(r#"{"properties":{"osProfile":{"linuxConfiguration":{}}}}"#);

        assert_eq!(
            translator
                .translate("Microsoft.Compute/virtualMachines", &windows)
                .as_deref(),
            Some("azurerm_windows_virtual_machine")
        );
        assert_eq!(
            translator
                .translate("Microsoft.Compute/virtualMachines", &linux)
                .as_deref(),
            Some("azurerm_linux_virtual_machine")
        );
    }

    #[test]
    fn test_virtual_machine_disambiguated_by_os_disk() {
        let translator = TypeTranslator::new();
        let windows = doc(r#"{"properties":{"storageProfile":{"osDisk":{"osType":"Windows"}}}}"#);
        assert_eq!(
            translator
                .translate("Microsoft.Compute/virtualMachines", &windows)
                .as_deref(),
            Some("azurerm_windows_virtual_machine")
        );
    }

    #[test]
    fn test_web_site_disambiguated_by_kind() {
        let translator = TypeTranslator::new();
        assert_eq!(
            translator
                .translate("Microsoft.Web/sites", &doc(r#"{"kind":"functionapp,linux"}"#))
                .as_deref(),
            Some("azurerm_function_app")
        );
        assert_eq!(
            translator
                .translate("Microsoft.Web/sites", &doc(r#"{"kind":"app"}"#))
                .as_deref(),
            Some("azurerm_app_service")
        );
    }

    #[test]
    fn test_unknown_type_has_no_mapping() {
        let translator = TypeTranslator::new();
        assert_eq!(translator.translate("Microsoft.Foo/bar", &doc("{}")), None);
    }
}
