//! Provider for ARM template and bicep projects.
//!
//! Converts the template to a what-if payload by invoking the external
//! planning tool, then delegates to the what-if JSON provider. The
//! command runs with its working directory set to the template's parent
//! so relative references inside the template resolve.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::project::Project;
use crate::registry::Registry;
use crate::usage::UsageMap;

use super::command::{run_az, whatif_args, CmdOptions};
use super::whatif_json::WhatIfJsonProvider;
use super::Provider;

/// Provider that plans an ARM template (or bicep file) through the
/// external tool before normalizing.
#[derive(Debug)]
pub struct ArmTemplateProvider {
    config: ProjectConfig,
    registry: Arc<Registry>,
}

impl ArmTemplateProvider {
    /// Creates a provider for the given project.
    #[must_use]
    pub const fn new(config: ProjectConfig, registry: Arc<Registry>) -> Self {
        Self { config, registry }
    }

    /// Runs the what-if call for the configured template.
    async fn whatif_payload(&self) -> Result<Vec<u8>> {
        let template = &self.config.path;
        let args = whatif_args(&self.config, template)?;
        let opts = CmdOptions {
            binary: self.config.az_binary.clone(),
            dir: template.parent().map(Path::to_path_buf),
        };

        info!("Converting ARM template to what-if payload: {}", template.display());
        run_az(&opts, &args).await
    }
}

#[async_trait]
impl Provider for ArmTemplateProvider {
    fn type_name(&self) -> &'static str {
        if self.config.path.extension().is_some_and(|ext| ext == "bicep") {
            "azurerm_bicep_template"
        } else {
            "azurerm_template_json"
        }
    }

    fn display_type(&self) -> &'static str {
        if self.config.path.extension().is_some_and(|ext| ext == "bicep") {
            "Azure Bicep Template"
        } else {
            "Azure Resource Manager Template JSON"
        }
    }

    async fn load_resources(&self, usage: &UsageMap) -> Result<Vec<Project>> {
        let payload = self.whatif_payload().await?;
        let inner = WhatIfJsonProvider::with_content(
            self.config.clone(),
            Arc::clone(&self.registry),
            payload,
        );

        let mut projects = inner.load_resources(usage).await?;
        for project in &mut projects {
            project.metadata.provider_type = self.type_name().to_string();
        }
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use std::path::PathBuf;

    #[test]
    fn test_type_name_tracks_extension() {
        let registry = Arc::new(default_registry());

        let json = ArmTemplateProvider::new(
            ProjectConfig::for_path("./azuredeploy.json"),
            Arc::clone(&registry),
        );
        assert_eq!(json.type_name(), "azurerm_template_json");

        let bicep = ArmTemplateProvider::new(
            ProjectConfig::for_path(PathBuf::from("./main.bicep")),
            registry,
        );
        assert_eq!(bicep.type_name(), "azurerm_bicep_template");
        assert_eq!(bicep.display_type(), "Azure Bicep Template");
    }

    // The full template flow is exercised with a stand-in binary that
    // emits a fixed what-if payload, since the real planning tool is
    // not available in tests.
    #[tokio::test]
    async fn test_template_flow_with_stub_binary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let template = dir.path().join("azuredeploy.json");
        std::fs::write(&template, "{}").expect("write template");

        let payload = r#"{"status": "Succeeded", "changes": [{"resourceId": "/vnet1", "changeType": "Create", "after": {"id": "/vnet1", "type": "Microsoft.Network/virtualNetworks"}}]}"#;
        let stub = dir.path().join("az-stub.sh");
        std::fs::write(&stub, format!("#!/bin/sh\necho '{payload}'\n")).expect("write stub");
        let mut perms = std::fs::metadata(&stub).expect("stat").permissions();
        std::os::unix::fs::PermissionsExt::set_mode(&mut perms, 0o755);
        std::fs::set_permissions(&stub, perms).expect("chmod");

        let mut config = ProjectConfig::for_path(&template);
        config.arm_resource_group = Some(String::from("rg-test"));
        config.az_binary = Some(stub.display().to_string());

        let provider = ArmTemplateProvider::new(config, Arc::new(default_registry()));
        let projects = provider.load_resources(&UsageMap::new()).await.expect("load");
        assert_eq!(projects[0].partial_resources.len(), 1);
        assert_eq!(projects[0].partial_past_resources.len(), 0);
    }
}
