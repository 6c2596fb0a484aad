//! Aggregated pipeline output.
//!
//! A project collects the outcomes of one pipeline run as two ordered
//! sequences: current-state resources and prior-state resources, in the
//! same order as the input plan's changes. Outcomes do not outlive the
//! run that produced them.

use chrono::{DateTime, Utc};

use crate::normalize::{NormalizedChange, PartialResource};

/// Metadata describing where a project's plan came from.
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    /// Path to the plan or template file.
    pub path: String,
    /// Provider type identifier (e.g. `azurerm_whatif_json`).
    pub provider_type: String,
    /// When the project output was generated.
    pub generated_at: DateTime<Utc>,
}

/// One estimated project: name, provenance, and the two outcome
/// sequences.
#[derive(Debug)]
pub struct Project {
    /// Project display name.
    pub name: String,
    /// Provenance metadata.
    pub metadata: ProjectMetadata,
    /// Current-state outcomes, in plan order.
    pub partial_resources: Vec<PartialResource>,
    /// Prior-state outcomes, in plan order.
    pub partial_past_resources: Vec<PartialResource>,
}

impl ProjectMetadata {
    /// Creates metadata for the given path and provider type.
    #[must_use]
    pub fn new(path: impl Into<String>, provider_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            provider_type: provider_type.into(),
            generated_at: Utc::now(),
        }
    }

    /// Derives a project name from the plan path when none is configured.
    #[must_use]
    pub fn generate_project_name(&self) -> String {
        std::path::Path::new(&self.path)
            .file_stem()
            .map_or_else(|| self.path.clone(), |stem| stem.to_string_lossy().into_owned())
    }
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub const fn new(name: String, metadata: ProjectMetadata) -> Self {
        Self {
            name,
            metadata,
            partial_resources: Vec::new(),
            partial_past_resources: Vec::new(),
        }
    }

    /// Appends the outcomes of a normalized change, preserving plan order.
    pub fn add_change(&mut self, change: NormalizedChange) {
        if let Some(past) = change.partial_past_resource {
            self.partial_past_resources.push(past);
        }
        if let Some(current) = change.partial_resource {
            self.partial_resources.push(current);
        }
    }

    /// Returns the number of skipped current-state resources.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.partial_resources
            .iter()
            .filter(|p| p.is_skipped())
            .count()
    }

    /// Returns the number of costable current-state resources.
    #[must_use]
    pub fn costable_count(&self) -> usize {
        self.partial_resources
            .iter()
            .filter(|p| !p.is_skipped())
            .count()
    }
}
