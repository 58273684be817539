// ABOUTME: Per-agent bootstrap recipes and the concrete steps they resolve to.
// ABOUTME: Order is fixed: dirs, env file, required tools, install, start.

use crate::command::{Alternatives, CommandLine};
use crate::runner::CommandRunner;
use crate::toolchain::Toolchain;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// How to get one agent from a fresh checkout to running.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    /// Directories (relative to the agent directory) created up front.
    #[serde(default)]
    pub ensure_dirs: Vec<PathBuf>,

    /// Env file that must exist before the agent can run.
    #[serde(default)]
    pub env_file: Option<EnvFile>,

    /// Tools that must be installed; no fallback exists for these.
    #[serde(default)]
    pub requires: Vec<Requirement>,

    /// Dependency install, skipped when its marker exists.
    #[serde(default)]
    pub install: Option<Install>,

    /// The command that actually runs the agent.
    pub start: Alternatives,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvFile {
    pub path: PathBuf,
    pub template: PathBuf,
    /// Extra advice printed when the file is missing.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requirement {
    pub tool: String,
    /// Where to get the tool, shown when it is missing.
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Install {
    /// Path whose existence means dependencies are already installed.
    /// Without one, the install runs every time.
    #[serde(default)]
    pub marker: Option<PathBuf>,
    pub run: Alternatives,
}

/// One resolved bootstrap action. Paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    EnsureDir {
        path: PathBuf,
    },
    /// Only planned when `path` is missing.
    SeedEnvFile {
        path: PathBuf,
        template: PathBuf,
        template_exists: bool,
        note: Option<String>,
    },
    RequireTool {
        tool: String,
        hint: Option<String>,
        available: bool,
    },
    Install {
        command: CommandLine,
        marker: Option<PathBuf>,
        skipped: bool,
    },
    Start {
        command: CommandLine,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::EnsureDir { path } => write!(f, "ensure directory {}", path.display()),
            Step::SeedEnvFile {
                path,
                template,
                template_exists: true,
                ..
            } => write!(
                f,
                "seed {} from {} and stop",
                path.display(),
                template.display()
            ),
            Step::SeedEnvFile { path, .. } => {
                write!(f, "warn: {} not found (no template)", path.display())
            }
            Step::RequireTool {
                tool, available, ..
            } => {
                let state = if *available { "found" } else { "missing" };
                write!(f, "require {} [{}]", tool, state)
            }
            Step::Install {
                command,
                marker: Some(marker),
                skipped: true,
            } => write!(
                f,
                "install: {} (skipped, {} exists)",
                command,
                marker.display()
            ),
            Step::Install { command, .. } => write!(f, "install: {}", command),
            Step::Start { command } => write!(f, "start: {}", command),
        }
    }
}

impl Recipe {
    /// A recipe that only runs `start`.
    pub fn start_only(start: impl Into<Alternatives>) -> Self {
        Self {
            ensure_dirs: Vec::new(),
            env_file: None,
            requires: Vec::new(),
            install: None,
            start: start.into(),
        }
    }

    /// Resolve this recipe against the agent directory `dir`.
    ///
    /// Inspects the filesystem and looks tools up but runs nothing.
    pub async fn plan<R>(&self, dir: &Path, toolchain: &Toolchain, runner: &R) -> Vec<Step>
    where
        R: CommandRunner + ?Sized,
    {
        let mut steps = self.plan_setup(dir);
        steps.extend(self.plan_requirements(toolchain, runner).await);
        steps.extend(self.plan_commands(dir, toolchain, runner).await);
        steps
    }

    /// Directory creation and env file seeding. Looks up no tools.
    pub fn plan_setup(&self, dir: &Path) -> Vec<Step> {
        let mut steps: Vec<Step> = self
            .ensure_dirs
            .iter()
            .map(|rel| Step::EnsureDir {
                path: dir.join(rel),
            })
            .collect();

        if let Some(env_file) = &self.env_file {
            let path = dir.join(&env_file.path);
            if !path.exists() {
                let template = dir.join(&env_file.template);
                steps.push(Step::SeedEnvFile {
                    template_exists: template.is_file(),
                    path,
                    template,
                    note: env_file.note.clone(),
                });
            }
        }

        steps
    }

    /// One `RequireTool` step per required tool.
    pub async fn plan_requirements<R>(&self, toolchain: &Toolchain, runner: &R) -> Vec<Step>
    where
        R: CommandRunner + ?Sized,
    {
        let mut steps = Vec::with_capacity(self.requires.len());
        for req in &self.requires {
            steps.push(Step::RequireTool {
                tool: req.tool.clone(),
                hint: req.hint.clone(),
                available: toolchain.available(runner, &req.tool).await,
            });
        }
        steps
    }

    /// Install (if any) and start, with alternatives resolved.
    pub async fn plan_commands<R>(&self, dir: &Path, toolchain: &Toolchain, runner: &R) -> Vec<Step>
    where
        R: CommandRunner + ?Sized,
    {
        let mut steps = Vec::with_capacity(2);

        if let Some(install) = &self.install {
            let marker = install.marker.as_ref().map(|m| dir.join(m));
            let skipped = marker.as_ref().is_some_and(|m| m.exists());
            steps.push(Step::Install {
                command: install.run.resolve(toolchain, runner).await.clone(),
                marker,
                skipped,
            });
        }

        steps.push(Step::Start {
            command: self.start.resolve(toolchain, runner).await.clone(),
        });

        steps
    }

    /// Every command line this recipe may run.
    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        self.install
            .iter()
            .flat_map(|i| i.run.commands())
            .chain(self.start.commands())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_recipe() {
        let recipe: Recipe = toml::from_str(
            r#"
            ensure_dirs = ["agent/custom_scripts"]
            env_file = { path = ".env", template = ".env.example", note = "Set IMAP vars." }
            requires = [{ tool = "uv", hint = "https://docs.astral.sh/uv/" }]
            install = { marker = "node_modules", run = [["bun", "install"], ["npm", "install"]] }
            start = ["npm", "start"]
        "#,
        )
        .unwrap();

        assert_eq!(recipe.ensure_dirs, vec![PathBuf::from("agent/custom_scripts")]);
        let env_file = recipe.env_file.as_ref().unwrap();
        assert_eq!(env_file.note.as_deref(), Some("Set IMAP vars."));
        assert_eq!(recipe.requires[0].tool, "uv");
        let install = recipe.install.as_ref().unwrap();
        assert_eq!(install.marker, Some(PathBuf::from("node_modules")));
        assert_eq!(install.run.commands().len(), 2);
        assert_eq!(recipe.commands().count(), 3);
    }

    #[test]
    fn test_parse_minimal_recipe() {
        let recipe: Recipe = toml::from_str(r#"start = ["npm", "start"]"#).unwrap();
        assert_eq!(recipe, Recipe::start_only(CommandLine::new("npm", ["start"])));
    }

    #[test]
    fn test_start_is_required() {
        assert!(toml::from_str::<Recipe>(r#"ensure_dirs = ["x"]"#).is_err());
    }

    #[test]
    fn test_step_display() {
        let step = Step::Install {
            command: CommandLine::new("npm", ["install"]),
            marker: Some(PathBuf::from("/demo/node_modules")),
            skipped: true,
        };
        assert_eq!(
            step.to_string(),
            "install: npm install (skipped, /demo/node_modules exists)"
        );

        let step = Step::RequireTool {
            tool: "uv".to_string(),
            hint: None,
            available: false,
        };
        assert_eq!(step.to_string(), "require uv [missing]");

        let step = Step::Start {
            command: CommandLine::new("npx", ["tsx", "hello-world.ts"]),
        };
        assert_eq!(step.to_string(), "start: npx tsx hello-world.ts");
    }
}
