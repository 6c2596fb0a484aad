//! Configuration parsing for armcost projects.

mod parser;
mod spec;

pub use parser::ConfigParser;
pub use spec::{ConfigFile, DeploymentMode, DeploymentScope, ProjectConfig};
