//! Provider detection.
//!
//! Picks the right provider for a project path: bicep files and ARM
//! deployment templates go through the external planning tool; what-if
//! result JSON is normalized directly.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::error::{ArmCostError, ConfigError, Result};
use crate::registry::Registry;

use super::arm_template::ArmTemplateProvider;
use super::whatif_json::WhatIfJsonProvider;
use super::Provider;

/// Detects and constructs the provider for a project.
///
/// # Errors
///
/// Returns an error if the path cannot be read or no provider matches
/// its content.
pub fn detect(config: ProjectConfig, registry: Arc<Registry>) -> Result<Box<dyn Provider>> {
    let path = config.path.clone();

    if path.extension().is_some_and(|ext| ext == "bicep") {
        debug!("Detected bicep template: {}", path.display());
        return Ok(Box::new(ArmTemplateProvider::new(config, registry)));
    }

    if !path.exists() {
        return Err(ArmCostError::Config(ConfigError::FileNotFound { path }));
    }

    let content = std::fs::read_to_string(&path)?;
    let document: Value = serde_json::from_str(&content).map_err(|_| {
        ArmCostError::Config(ConfigError::UnknownProjectType { path: path.clone() })
    })?;

    if document
        .get("$schema")
        .and_then(Value::as_str)
        .is_some_and(|schema| schema.contains("deploymentTemplate"))
    {
        debug!("Detected ARM deployment template: {}", path.display());
        return Ok(Box::new(ArmTemplateProvider::new(config, registry)));
    }

    if document.get("status").is_some() || document.get("changes").is_some() {
        debug!("Detected what-if result JSON: {}", path.display());
        return Ok(Box::new(WhatIfJsonProvider::new(config, registry)));
    }

    Err(ArmCostError::Config(ConfigError::UnknownProjectType { path }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;

    fn registry() -> Arc<Registry> {
        Arc::new(default_registry())
    }

    #[test]
    fn test_detects_whatif_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("what_if.json");
        std::fs::write(&path, r#"{"status": "Succeeded", "changes": []}"#).expect("write");

        let provider = detect(ProjectConfig::for_path(&path), registry()).expect("detect");
        assert_eq!(provider.type_name(), "azurerm_whatif_json");
    }

    #[test]
    fn test_detects_arm_template_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("azuredeploy.json");
        std::fs::write(
            &path,
            r#"{"$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#", "resources": []}"#,
        )
        .expect("write");

        let provider = detect(ProjectConfig::for_path(&path), registry()).expect("detect");
        assert_eq!(provider.type_name(), "azurerm_template_json");
    }

    #[test]
    fn test_detects_bicep_without_reading() {
        let provider = detect(ProjectConfig::for_path("./main.bicep"), registry()).expect("detect");
        assert_eq!(provider.type_name(), "azurerm_bicep_template");
    }

    #[test]
    fn test_unknown_content_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("mystery.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).expect("write");

        let err = detect(ProjectConfig::for_path(&path), registry()).expect_err("no provider");
        assert!(err.to_string().contains("Could not detect a provider"));
    }
}
