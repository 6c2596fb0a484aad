//! Project configuration schema.
//!
//! Projects are declared in a YAML configuration file; each entry points
//! at a what-if JSON file, an ARM template, or a bicep file, plus the
//! deployment coordinates the external planning tool needs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Configuration format version.
    pub version: String,
    /// Declared projects.
    pub projects: Vec<ProjectConfig>,
}

/// Configuration for a single project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project display name; derived from the path when empty.
    pub name: Option<String>,
    /// Path to the what-if JSON, ARM template, or bicep file.
    pub path: PathBuf,
    /// Deployment scope for the what-if call.
    pub arm_deployment_scope: DeploymentScope,
    /// Deployment mode for the what-if call.
    pub arm_deployment_mode: DeploymentMode,
    /// Azure location for scopes that need one.
    pub arm_location: Option<String>,
    /// Target resource group for resource-group scoped deployments.
    pub arm_resource_group: Option<String>,
    /// Target management group for management-group scoped deployments.
    pub arm_management_group_id: Option<String>,
    /// Optional deployment parameter file.
    pub arm_parameters_path: Option<PathBuf>,
    /// Override for the `az` binary.
    pub az_binary: Option<String>,
}

/// Deployment scope of a what-if call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentScope {
    /// Resource-group scoped deployment.
    #[default]
    ResourceGroup,
    /// Management-group scoped deployment.
    ManagementGroup,
    /// Subscription scoped deployment.
    Subscription,
    /// Tenant scoped deployment.
    Tenant,
}

/// Deployment mode of a what-if call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Incremental deployment (default).
    #[default]
    Incremental,
    /// Complete deployment.
    Complete,
}

impl ProjectConfig {
    /// Creates a project configuration for the given path.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns the project name, deriving one from the path when unset.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map_or_else(|| self.path.display().to_string(), |s| s.to_string_lossy().into_owned())
        })
    }
}

impl std::fmt::Display for DeploymentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ResourceGroup => "resourceGroup",
            Self::ManagementGroup => "managementGroup",
            Self::Subscription => "subscription",
            Self::Tenant => "tenant",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Incremental => "Incremental",
            Self::Complete => "Complete",
        };
        write!(f, "{s}")
    }
}
