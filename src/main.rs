//! Armcost CLI entrypoint.
//!
//! This is the main entrypoint for the armcost command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use armcost::cli::{Cli, Commands, OutputFormatter};
use armcost::config::{ConfigParser, ProjectConfig};
use armcost::error::{ArmCostError, ConfigError, Result};
use armcost::provider::detect;
use armcost::registry::default_registry;
use armcost::usage::UsageMap;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default configuration file names, checked in order.
const DEFAULT_CONFIG_FILES: &[&str] = &["armcost.yml", "armcost.yaml"];

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Breakdown { ref path, show_skipped } => {
            cmd_breakdown(cli.config.as_ref(), path.as_ref(), show_skipped, &formatter).await
        }
        Commands::Detect { ref path } => cmd_detect(cli.config.as_ref(), path.as_ref()),
    }
}

/// Normalize each project and print the per-resource breakdown.
async fn cmd_breakdown(
    config_path: Option<&PathBuf>,
    project_path: Option<&PathBuf>,
    show_skipped: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let projects = resolve_projects(config_path, project_path)?;
    let registry = Arc::new(default_registry());
    let usage = UsageMap::new();

    for project_config in projects {
        let provider = detect(project_config, Arc::clone(&registry))?;
        for project in provider.load_resources(&usage).await? {
            println!("{}", formatter.format_project(&project, show_skipped));
        }
    }

    Ok(())
}

/// Report which provider would handle each project.
fn cmd_detect(config_path: Option<&PathBuf>, project_path: Option<&PathBuf>) -> Result<()> {
    let projects = resolve_projects(config_path, project_path)?;
    let registry = Arc::new(default_registry());

    for project_config in projects {
        let path = project_config.path.clone();
        let provider = detect(project_config, Arc::clone(&registry))?;
        println!("{}: {} ({})", path.display(), provider.type_name(), provider.display_type());
    }

    Ok(())
}

/// Resolves the project list from the CLI path override or the
/// configuration file.
fn resolve_projects(
    config_path: Option<&PathBuf>,
    project_path: Option<&PathBuf>,
) -> Result<Vec<ProjectConfig>> {
    if let Some(path) = project_path {
        debug!("Using project path from command line: {}", path.display());
        return Ok(vec![ProjectConfig::for_path(path)]);
    }

    let parser = ConfigParser::new();
    parser.load_dotenv()?;

    let config_file = match config_path {
        Some(path) => path.clone(),
        None => find_default_config()?,
    };

    let config = parser.load_file(&config_file)?;
    Ok(config.projects)
}

/// Finds the default configuration file in the working directory.
fn find_default_config() -> Result<PathBuf> {
    for name in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(name);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ArmCostError::Config(ConfigError::FileNotFound {
        path: PathBuf::from(DEFAULT_CONFIG_FILES[0]),
    }))
}
