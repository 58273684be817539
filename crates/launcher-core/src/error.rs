// ABOUTME: Error types for the agents launcher.
// ABOUTME: LaunchError covers catalog, config, bootstrap, and child process failures.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LaunchError>;

/// Errors that can occur while resolving or launching an agent.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// No agent with this name in the catalog.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// The agent's directory does not exist under the launcher root.
    #[error("agent directory not found: {}", .0.display())]
    AgentDirMissing(PathBuf),

    /// An env file was seeded from its template and needs editing first.
    #[error("created {} from {}. Edit it, then run again", .path.display(), .template.display())]
    EnvFileCreated { path: PathBuf, template: PathBuf },

    /// A tool the agent needs is not installed.
    #[error(
        "{agent} requires '{tool}'.{}",
        .hint.as_deref().map(|h| format!(" Install: {h}")).unwrap_or_default()
    )]
    MissingTool {
        agent: String,
        tool: String,
        hint: Option<String>,
    },

    /// The child process could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child process ran and exited unsuccessfully.
    #[error("{program} exited with code {code}")]
    CommandFailed { program: String, code: i32 },

    /// The catalog is malformed.
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Configuration loading failed.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LaunchError {
    /// Exit status the launcher should terminate with for this error.
    /// A failed child's own code is passed through.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
