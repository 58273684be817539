// ABOUTME: Plans and executes an agent's recipe inside its directory.
// ABOUTME: Stops at the first failing step and forwards child exit codes.

use crate::catalog::AgentSpec;
use crate::error::{LaunchError, Result};
use crate::recipe::Step;
use crate::runner::CommandRunner;
use crate::toolchain::Toolchain;
use std::path::{Path, PathBuf};

pub struct Launcher<R> {
    root: PathBuf,
    runner: R,
    toolchain: Toolchain,
}

impl<R: CommandRunner> Launcher<R> {
    pub fn new(root: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            root: root.into(),
            runner,
            toolchain: Toolchain::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Absolute directory of `agent`; absolute catalog paths are kept as-is.
    pub fn agent_dir(&self, agent: &AgentSpec) -> PathBuf {
        self.root.join(&agent.directory)
    }

    /// Resolve the steps `launch` would take, without running anything.
    pub async fn plan(&self, agent: &AgentSpec) -> Result<Vec<Step>> {
        let dir = self.agent_dir(agent);
        if !dir.is_dir() {
            return Err(LaunchError::AgentDirMissing(dir));
        }
        Ok(agent.recipe.plan(&dir, &self.toolchain, &self.runner).await)
    }

    /// Bootstrap and run `agent`. Returns once its start command exits 0.
    /// Setup steps run before any tool is looked up.
    pub async fn launch(&self, agent: &AgentSpec) -> Result<()> {
        let dir = self.agent_dir(agent);
        if !dir.is_dir() {
            return Err(LaunchError::AgentDirMissing(dir));
        }
        tracing::info!(agent = %agent.name, dir = %dir.display(), "Launching");

        let recipe = &agent.recipe;
        for step in recipe.plan_setup(&dir) {
            self.execute(agent, &dir, step).await?;
        }
        for step in recipe.plan_requirements(&self.toolchain, &self.runner).await {
            self.execute(agent, &dir, step).await?;
        }
        for step in recipe
            .plan_commands(&dir, &self.toolchain, &self.runner)
            .await
        {
            self.execute(agent, &dir, step).await?;
        }
        Ok(())
    }

    async fn execute(&self, agent: &AgentSpec, dir: &Path, step: Step) -> Result<()> {
        match step {
            Step::EnsureDir { path } => {
                tokio::fs::create_dir_all(&path).await?;
            }
            Step::SeedEnvFile {
                path,
                template,
                template_exists,
                note,
            } => {
                let shown = self.relative(&path);
                match note {
                    Some(note) => eprintln!("Warning: {} not found. {}", shown.display(), note),
                    None => eprintln!("Warning: {} not found.", shown.display()),
                }
                if template_exists {
                    tokio::fs::copy(&template, &path).await?;
                    return Err(LaunchError::EnvFileCreated {
                        path: shown,
                        template: self.relative(&template),
                    });
                }
            }
            Step::RequireTool {
                tool,
                hint,
                available: false,
            } => {
                return Err(LaunchError::MissingTool {
                    agent: agent.name.clone(),
                    tool,
                    hint,
                });
            }
            Step::RequireTool { .. } => {}
            Step::Install {
                command,
                skipped: true,
                ..
            } => {
                tracing::debug!(agent = %agent.name, command = %command, "Dependencies present, skipping install");
            }
            Step::Install { command, .. } => {
                self.runner.run(&command, dir).await?;
            }
            Step::Start { command } => {
                self.runner.run(&command, dir).await?;
            }
        }
        Ok(())
    }

    /// Path relative to the root for user messages.
    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
