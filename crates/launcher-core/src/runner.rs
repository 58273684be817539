// ABOUTME: The seam between the launcher and the operating system.
// ABOUTME: SystemRunner spawns children with inherited stdio and maps exit codes to errors.

use crate::command::CommandLine;
use crate::error::{LaunchError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Runs external commands on behalf of the launcher.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Whether `program` is installed and answers `--version`.
    async fn has_tool(&self, program: &str) -> bool;

    /// Run `command` in `cwd` to completion. Non-zero exit is an error.
    async fn run(&self, command: &CommandLine, cwd: &Path) -> Result<()>;
}

/// Runs real child processes attached to the launcher's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn has_tool(&self, program: &str) -> bool {
        crate::toolchain::detect(program).await
    }

    async fn run(&self, command: &CommandLine, cwd: &Path) -> Result<()> {
        tracing::info!(command = %command, cwd = %cwd.display(), "Running");

        let status = Command::new(command.program())
            .args(command.args())
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| LaunchError::Spawn {
                program: command.program().to_string(),
                source,
            })?;

        tracing::debug!(command = %command, code = ?status.code(), "Exited");

        if status.success() {
            Ok(())
        } else {
            // Killed by a signal: no code to forward.
            Err(LaunchError::CommandFailed {
                program: command.program().to_string(),
                code: status.code().unwrap_or(1),
            })
        }
    }
}
