// ABOUTME: Detects which external tools (npm, bun, uv, ...) are installed.
// ABOUTME: Runs `<tool> --version` under a timeout and memoizes the answer.

use crate::runner::CommandRunner;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;

/// How long `<tool> --version` may take before the tool counts as missing.
pub const DETECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Check whether `program --version` runs and exits 0 within [`DETECT_TIMEOUT`].
pub async fn detect(program: &str) -> bool {
    detect_with_timeout(program, DETECT_TIMEOUT).await
}

/// [`detect`] with a caller-chosen timeout. A timed-out child is killed.
pub async fn detect_with_timeout(program: &str, limit: Duration) -> bool {
    let status = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status();

    match tokio::time::timeout(limit, status).await {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            tracing::debug!(program, error = %e, "Version check failed to spawn");
            false
        }
        Err(_) => {
            tracing::warn!(program, "Version check timed out after {:?}", limit);
            false
        }
    }
}

/// Per-process cache of tool lookups.
#[derive(Debug, Default)]
pub struct Toolchain {
    known: Mutex<HashMap<String, bool>>,
}

impl Toolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `program` is available, asking `runner` on first use.
    pub async fn available<R>(&self, runner: &R, program: &str) -> bool
    where
        R: CommandRunner + ?Sized,
    {
        let mut known = self.known.lock().await;
        if let Some(&found) = known.get(program) {
            return found;
        }

        let found = runner.has_tool(program).await;
        tracing::debug!(program, found, "Checked tool");
        known.insert(program.to_string(), found);
        found
    }
}
