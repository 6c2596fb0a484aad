//! Configuration parser for loading project configuration files.
//!
//! Handles loading configuration from YAML files and environment
//! variables, with proper precedence and error handling.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ArmCostError, ConfigError, Result};

use super::spec::{ConfigFile, ProjectConfig};

/// Configuration parser for loading project configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ConfigFile> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ArmCostError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ArmCostError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ConfigFile> {
        debug!("Parsing YAML configuration");

        let mut config: ConfigFile = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            ArmCostError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        for project in &mut config.projects {
            Self::apply_env_overrides(project);
        }

        debug!("Parsed configuration with {} project(s)", config.projects.len());
        Ok(config)
    }

    /// Applies environment variable overrides to a project.
    fn apply_env_overrides(project: &mut ProjectConfig) {
        if let Ok(binary) = std::env::var("ARMCOST_AZ_BINARY") {
            debug!("Overriding az_binary from environment");
            project.az_binary = Some(binary);
        }

        if let Ok(location) = std::env::var("ARMCOST_ARM_LOCATION") {
            debug!("Overriding arm_location from environment");
            project.arm_location = Some(location);
        }

        if let Ok(group) = std::env::var("ARMCOST_ARM_RESOURCE_GROUP") {
            debug!("Overriding arm_resource_group from environment");
            project.arm_resource_group = Some(group);
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                ArmCostError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::spec::{DeploymentMode, DeploymentScope};

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r"
version: '0.1'
projects:
  - path: ./what_if.json
";
        let parser = ConfigParser::new();
        let config = parser.parse_yaml(yaml, None).expect("parse");
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.projects[0].display_name(), "what_if");
        assert_eq!(config.projects[0].arm_deployment_scope, DeploymentScope::ResourceGroup);
        assert_eq!(config.projects[0].arm_deployment_mode, DeploymentMode::Incremental);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
version: '0.1'
projects:
  - name: web-app
    path: ./arm/azuredeploy.json
    arm_deployment_scope: resourceGroup
    arm_deployment_mode: complete
    arm_location: westeurope
    arm_resource_group: rg-armcost-test
    arm_parameters_path: ./arm/azuredeploy.parameters.json
    az_binary: /usr/local/bin/az
";
        let parser = ConfigParser::new();
        let config = parser.parse_yaml(yaml, None).expect("parse");
        let project = &config.projects[0];
        assert_eq!(project.display_name(), "web-app");
        assert_eq!(project.arm_deployment_mode, DeploymentMode::Complete);
        assert_eq!(project.arm_resource_group.as_deref(), Some("rg-armcost-test"));
        assert_eq!(project.az_binary.as_deref(), Some("/usr/local/bin/az"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let parser = ConfigParser::new();
        let result = parser.load_file("/definitely/not/here.yml");
        assert!(result.is_err());
    }
}
