//! External planning-tool invocation.
//!
//! The what-if payload for a template project comes from the `az` CLI.
//! Combined stdout is captured as the plan payload; stderr is forwarded
//! to the logging sink line-by-line so long-running deployments cannot
//! grow an unbounded buffer. A non-zero exit is fatal and carries the
//! captured stderr.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::config::{DeploymentScope, ProjectConfig};
use crate::error::{ArmCostError, CommandError, ConfigError, Result};

/// Default `az` binary name, resolved via `PATH`.
pub const DEFAULT_AZ_BINARY: &str = "az";

/// Options for one external command invocation.
#[derive(Debug, Clone, Default)]
pub struct CmdOptions {
    /// Binary override; defaults to [`DEFAULT_AZ_BINARY`].
    pub binary: Option<String>,
    /// Working directory for the command.
    pub dir: Option<PathBuf>,
}

/// Runs the planning tool with the given arguments, returning captured
/// stdout.
///
/// # Errors
///
/// Returns an error if the binary cannot be spawned or exits non-zero;
/// the captured stderr is attached to the exit error.
pub async fn run_az(opts: &CmdOptions, args: &[String]) -> Result<Vec<u8>> {
    let binary = opts.binary.as_deref().unwrap_or(DEFAULT_AZ_BINARY);
    debug!("Running command: {} {}", binary, args.join(" "));

    let mut command = Command::new(binary);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &opts.dir {
        command.current_dir(dir);
    }

    let mut child = command
        .spawn()
        .map_err(|e| CommandError::spawn(binary, e.to_string()))?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ArmCostError::internal("child stdout pipe missing"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| ArmCostError::internal("child stderr pipe missing"))?;

    // Drain stdout concurrently with the stderr line loop so neither
    // pipe can fill and stall the child.
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    });

    let mut stderr_lines = Vec::new();
    let mut lines = BufReader::new(stderr).lines();
    while let Some(line) = lines.next_line().await? {
        debug!(binary, "{line}");
        stderr_lines.push(line);
    }

    let status = child.wait().await?;
    let output = stdout_task
        .await
        .map_err(|e| ArmCostError::internal(format!("stdout reader failed: {e}")))??;

    if !status.success() {
        return Err(CommandError::NonZeroExit {
            binary: binary.to_string(),
            status: status
                .code()
                .map_or_else(|| String::from("signal"), |code| code.to_string()),
            stderr: stderr_lines.join("\n"),
        }
        .into());
    }

    Ok(output)
}

/// Builds the what-if arguments for a project, dispatching on its
/// deployment scope. Scopes other than the resource group are an
/// explicit unsupported-scope error, never a silent fallthrough.
///
/// # Errors
///
/// Returns an error for unsupported scopes or a missing resource group.
pub fn whatif_args(project: &ProjectConfig, template_file: &Path) -> Result<Vec<String>> {
    match project.arm_deployment_scope {
        DeploymentScope::ResourceGroup => group_deployment_args(project, template_file),
        other => Err(CommandError::UnsupportedScope {
            scope: other.to_string(),
        }
        .into()),
    }
}

/// Builds the arguments for a resource-group scoped what-if call.
fn group_deployment_args(project: &ProjectConfig, template_file: &Path) -> Result<Vec<String>> {
    let resource_group = project.arm_resource_group.as_deref().ok_or_else(|| {
        ConfigError::MissingField {
            field: String::from("arm_resource_group"),
        }
    })?;

    let mut args = vec![
        String::from("deployment"),
        String::from("group"),
        String::from("what-if"),
        String::from("--no-pretty-print"),
        String::from("--mode"),
        project.arm_deployment_mode.to_string(),
        String::from("--resource-group"),
        resource_group.to_string(),
        String::from("--template-file"),
        template_file.display().to_string(),
    ];

    if let Some(parameters) = &project.arm_parameters_path {
        args.push(String::from("--parameters"));
        args.push(parameters.display().to_string());
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentScope;

    fn project() -> ProjectConfig {
        let mut project = ProjectConfig::for_path("./azuredeploy.json");
        project.arm_resource_group = Some(String::from("rg-armcost-test"));
        project
    }

    #[test]
    fn test_group_deployment_args() {
        let args = whatif_args(&project(), Path::new("azuredeploy.json")).expect("args");
        assert_eq!(args[..3], [String::from("deployment"), String::from("group"), String::from("what-if")]);
        assert!(args.contains(&String::from("--no-pretty-print")));
        assert!(args.contains(&String::from("rg-armcost-test")));
        assert!(args.contains(&String::from("Incremental")));
        assert!(!args.contains(&String::from("--parameters")));
    }

    #[test]
    fn test_parameter_file_is_passed_through() {
        let mut project = project();
        project.arm_parameters_path = Some(PathBuf::from("params.json"));
        let args = whatif_args(&project, Path::new("azuredeploy.json")).expect("args");
        assert!(args.contains(&String::from("--parameters")));
        assert!(args.contains(&String::from("params.json")));
    }

    #[test]
    fn test_unsupported_scope_is_an_explicit_error() {
        let mut project = project();
        project.arm_deployment_scope = DeploymentScope::Tenant;
        let err = whatif_args(&project, Path::new("azuredeploy.json")).expect_err("unsupported");
        assert!(err.to_string().contains("Unsupported deployment scope"));
    }

    #[test]
    fn test_missing_resource_group_is_an_error() {
        let project = ProjectConfig::for_path("./azuredeploy.json");
        let err = whatif_args(&project, Path::new("azuredeploy.json")).expect_err("missing group");
        assert!(err.to_string().contains("arm_resource_group"));
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let opts = CmdOptions {
            binary: Some(String::from("echo")),
            dir: None,
        };
        let output = run_az(&opts, &[String::from("hello")]).await.expect("run");
        assert_eq!(String::from_utf8_lossy(&output).trim(), "hello");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_fatal() {
        let opts = CmdOptions {
            binary: Some(String::from("false")),
            dir: None,
        };
        let err = run_az(&opts, &[]).await.expect_err("non-zero exit");
        assert!(err.to_string().contains("exited with status"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let opts = CmdOptions {
            binary: Some(String::from("/definitely/not/a/binary")),
            dir: None,
        };
        let err = run_az(&opts, &[]).await.expect_err("spawn failure");
        assert!(err.to_string().contains("Failed to run"));
    }
}
