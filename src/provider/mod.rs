//! Plan acquisition providers.
//!
//! Providers turn a configured project into normalized pipeline output.
//! The core contract is byte-oriented: whether the what-if payload came
//! from disk or from the external planning tool is invisible past this
//! boundary.

mod arm_template;
mod command;
mod detect;
mod whatif_json;

pub use arm_template::ArmTemplateProvider;
pub use command::{run_az, whatif_args, CmdOptions, DEFAULT_AZ_BINARY};
pub use detect::detect;
pub use whatif_json::WhatIfJsonProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::project::Project;
use crate::usage::UsageMap;

/// A source of normalized projects.
#[async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Machine-readable provider type identifier.
    fn type_name(&self) -> &'static str;

    /// Human-readable provider description.
    fn display_type(&self) -> &'static str;

    /// Loads and normalizes the project's resources.
    async fn load_resources(&self, usage: &UsageMap) -> Result<Vec<Project>>;
}
