//! Provider for what-if result JSON files.
//!
//! The pipeline core consumes raw bytes and does not care whether they
//! came from disk or from the planning tool; this provider reads them
//! from the configured path (or uses pre-supplied bytes) and aggregates
//! the normalized outcomes into a project.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::project::{Project, ProjectMetadata};
use crate::registry::Registry;
use crate::usage::UsageMap;

use super::Provider;

/// Provider that loads resources from a what-if result JSON file.
#[derive(Debug)]
pub struct WhatIfJsonProvider {
    config: ProjectConfig,
    registry: Arc<Registry>,
    content: Option<Vec<u8>>,
}

impl WhatIfJsonProvider {
    /// Creates a provider that reads the what-if payload from the
    /// project's path.
    #[must_use]
    pub const fn new(config: ProjectConfig, registry: Arc<Registry>) -> Self {
        Self {
            config,
            registry,
            content: None,
        }
    }

    /// Creates a provider over a pre-acquired what-if payload.
    #[must_use]
    pub const fn with_content(
        config: ProjectConfig,
        registry: Arc<Registry>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            config,
            registry,
            content: Some(content),
        }
    }

    /// Reads the payload from disk unless it was supplied up front.
    fn payload(&self) -> Result<Vec<u8>> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => {
                debug!("Reading what-if payload from: {}", self.config.path.display());
                Ok(std::fs::read(&self.config.path)?)
            }
        }
    }
}

#[async_trait]
impl Provider for WhatIfJsonProvider {
    fn type_name(&self) -> &'static str {
        "azurerm_whatif_json"
    }

    fn display_type(&self) -> &'static str {
        "Azure Resource Manager WhatIf JSON"
    }

    async fn load_resources(&self, usage: &UsageMap) -> Result<Vec<Project>> {
        let payload = self.payload()?;

        let metadata = ProjectMetadata::new(
            self.config.path.display().to_string(),
            self.type_name(),
        );
        let name = self
            .config
            .name
            .clone()
            .unwrap_or_else(|| metadata.generate_project_name());

        let normalizer = Normalizer::new(&self.registry);
        let changes = normalizer.parse(&payload, usage)?;

        let mut project = Project::new(name, metadata);
        for change in changes {
            project.add_change(change);
        }

        info!(
            "Loaded {} current and {} prior resource(s) for project '{}'",
            project.partial_resources.len(),
            project.partial_past_resources.len(),
            project.name
        );

        Ok(vec![project])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;

    const TWO_CREATES: &str = r#"{
        "status": "Succeeded",
        "changes": [
            {"resourceId": "/vnet1", "changeType": "Create", "after": {"id": "/vnet1", "type": "Microsoft.Network/virtualNetworks"}},
            {"resourceId": "/vm1", "changeType": "Create", "after": {"id": "/vm1", "type": "Microsoft.Compute/virtualMachines"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_resources_from_content() {
        let provider = WhatIfJsonProvider::with_content(
            ProjectConfig::for_path("./what_if.json"),
            Arc::new(default_registry()),
            TWO_CREATES.as_bytes().to_vec(),
        );

        let projects = provider.load_resources(&UsageMap::new()).await.expect("load");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "what_if");
        assert_eq!(projects[0].partial_resources.len(), 2);
        assert_eq!(projects[0].partial_past_resources.len(), 0);
    }

    #[tokio::test]
    async fn test_load_resources_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("what_if.json");
        std::fs::write(&path, TWO_CREATES).expect("write");

        let provider = WhatIfJsonProvider::new(
            ProjectConfig::for_path(&path),
            Arc::new(default_registry()),
        );

        let projects = provider.load_resources(&UsageMap::new()).await.expect("load");
        assert_eq!(projects[0].partial_resources.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let provider = WhatIfJsonProvider::new(
            ProjectConfig::for_path("/no/such/what_if.json"),
            Arc::new(default_registry()),
        );
        assert!(provider.load_resources(&UsageMap::new()).await.is_err());
    }
}
