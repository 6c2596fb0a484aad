//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying normalized
//! projects to the user in various formats.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::normalize::PartialResource;
use crate::project::Project;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// JSON projection of a project.
#[derive(Serialize)]
struct ProjectJson<'a> {
    name: &'a str,
    provider_type: &'a str,
    resources: Vec<ResourceJson<'a>>,
    past_resources: Vec<ResourceJson<'a>>,
}

/// JSON projection of one outcome.
#[derive(Serialize)]
struct ResourceJson<'a> {
    name: &'a str,
    resource_type: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cloud_resource_ids: Vec<&'a str>,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a normalized project for display.
    #[must_use]
    pub fn format_project(&self, project: &Project, show_skipped: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ProjectJson::from_project(project, show_skipped))
                    .unwrap_or_default()
            }
            OutputFormat::Text => Self::format_project_text(project, show_skipped),
        }
    }

    /// Formats a project as text.
    fn format_project_text(project: &Project, show_skipped: bool) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nProject: {} ({})\n\n",
            project.name, project.metadata.provider_type
        );

        let rows: Vec<ResourceRow> = project
            .partial_resources
            .iter()
            .filter(|p| show_skipped || !p.is_skipped())
            .map(ResourceRow::from_outcome)
            .collect();

        if rows.is_empty() {
            output.push_str("No costable resources found.\n");
        } else {
            let table = Table::new(rows).to_string();
            output.push_str(&table);
            output.push('\n');
        }

        if !project.partial_past_resources.is_empty() {
            let _ = write!(
                output,
                "\nPrior state: {} resource(s)\n",
                project.partial_past_resources.len()
            );
        }

        let _ = write!(
            output,
            "\nSummary: {} costable, {} skipped\n",
            project.costable_count().to_string().green(),
            project.skipped_count().to_string().yellow()
        );

        output
    }
}

impl ResourceRow {
    /// Builds a display row for one outcome.
    fn from_outcome(outcome: &PartialResource) -> Self {
        Self {
            name: outcome.display_name().to_string(),
            resource_type: outcome.canonical_type().to_string(),
            outcome: outcome_label(outcome).to_string(),
            reason: outcome.skip_reason().unwrap_or_default().to_string(),
        }
    }
}

impl<'a> ProjectJson<'a> {
    /// Builds the JSON projection of a project.
    fn from_project(project: &'a Project, show_skipped: bool) -> Self {
        let map = |outcomes: &'a [PartialResource]| {
            outcomes
                .iter()
                .filter(|p| show_skipped || !p.is_skipped())
                .map(|p| ResourceJson {
                    name: p.display_name(),
                    resource_type: p.canonical_type(),
                    outcome: outcome_label(p),
                    skip_message: p.skip_reason(),
                    cloud_resource_ids: p.cloud_resource_ids.iter().map(String::as_str).collect(),
                })
                .collect()
        };

        Self {
            name: &project.name,
            provider_type: &project.metadata.provider_type,
            resources: map(&project.partial_resources),
            past_resources: map(&project.partial_past_resources),
        }
    }
}

/// Returns a short label for an outcome.
fn outcome_label(outcome: &PartialResource) -> &'static str {
    if outcome.core_resource.is_some() {
        "core"
    } else if outcome.is_no_price() {
        "free"
    } else if outcome.is_skipped() {
        "skipped"
    } else {
        "costable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::project::{Project, ProjectMetadata};
    use crate::registry::default_registry;
    use crate::usage::UsageMap;

    fn sample_project() -> Project {
        let registry = default_registry();
        let normalizer = Normalizer::new(&registry);
        let payload = r#"{
            "status": "Succeeded",
            "changes": [
                {"resourceId": "/vm1", "changeType": "Create", "after": {"id": "/vm1", "type": "Microsoft.Compute/virtualMachines"}},
                {"resourceId": "/x", "changeType": "Create", "after": {"id": "/x", "type": "Microsoft.Foo/bar"}}
            ]
        }"#;
        let changes = normalizer
            .parse(payload.as_bytes(), &UsageMap::new())
            .expect("parse");

        let mut project = Project::new(
            String::from("sample"),
            ProjectMetadata::new("./what_if.json", "azurerm_whatif_json"),
        );
        for change in changes {
            project.add_change(change);
        }
        project
    }

    #[test]
    fn test_text_breakdown_hides_skipped_by_default() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_project(&sample_project(), false);
        assert!(text.contains("vm1"));
        assert!(!text.contains("Microsoft.Foo/bar"));
        assert!(text.contains("1 skipped"));
    }

    #[test]
    fn test_json_breakdown_includes_skip_reason() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format_project(&sample_project(), true);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let resources = value["resources"].as_array().expect("resources");
        assert_eq!(resources.len(), 2);
        assert_eq!(
            resources[1]["skip_message"].as_str(),
            Some("This resource is not currently supported")
        );
    }
}
