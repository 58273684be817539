// ABOUTME: The catalog of launchable agents.
// ABOUTME: Built-in entries come from an embedded TOML table; user entries merge over them.

use crate::command::Alternatives;
use crate::error::{LaunchError, Result};
use crate::recipe::{EnvFile, Install, Recipe, Requirement};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

const BUILTIN: &str = include_str!("builtin.toml");

/// One named demo application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AgentEntry")]
pub struct AgentSpec {
    /// Short lowercase name used on the command line.
    pub name: String,
    pub description: String,
    /// Relative to the launcher root, or absolute.
    pub directory: PathBuf,
    pub recipe: Recipe,
}

/// On-disk shape of an `[[agents]]` table: recipe fields sit beside the name.
#[derive(Deserialize)]
struct AgentEntry {
    name: String,
    #[serde(default)]
    description: String,
    directory: PathBuf,
    #[serde(default)]
    ensure_dirs: Vec<PathBuf>,
    #[serde(default)]
    env_file: Option<EnvFile>,
    #[serde(default)]
    requires: Vec<Requirement>,
    #[serde(default)]
    install: Option<Install>,
    start: Alternatives,
}

impl From<AgentEntry> for AgentSpec {
    fn from(entry: AgentEntry) -> Self {
        Self {
            name: entry.name.trim().to_lowercase(),
            description: entry.description,
            directory: entry.directory,
            recipe: Recipe {
                ensure_dirs: entry.ensure_dirs,
                env_file: entry.env_file,
                requires: entry.requires,
                install: entry.install,
                start: entry.start,
            },
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    agents: Vec<AgentSpec>,
}

/// Ordered set of agents. Listing follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    agents: Vec<AgentSpec>,
}

impl Catalog {
    /// The agents that ship with the launcher.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN)
    }

    /// Parse and validate a document of `[[agents]]` tables.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| LaunchError::Catalog(format!("failed to parse: {}", e)))?;
        let catalog = Self::from_agents(file.agents);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_agents(agents: Vec<AgentSpec>) -> Self {
        Self { agents }
    }

    /// Overlay `others`: same-named entries are replaced in place, new ones appended.
    pub fn merge(mut self, others: impl IntoIterator<Item = AgentSpec>) -> Self {
        for agent in others {
            match self.agents.iter_mut().find(|a| a.name == agent.name) {
                Some(existing) => {
                    tracing::debug!(agent = %agent.name, "Overriding built-in agent");
                    *existing = agent;
                }
                None => self.agents.push(agent),
            }
        }
        self
    }

    /// Look up an agent by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Result<&AgentSpec> {
        let wanted = name.trim().to_lowercase();
        self.agents
            .iter()
            .find(|a| a.name == wanted)
            .ok_or_else(|| LaunchError::UnknownAgent(wanted))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentSpec> {
        self.agents.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.is_empty() {
                return Err(LaunchError::Catalog("agent name is required".into()));
            }
            if agent.name.contains(char::is_whitespace) {
                return Err(LaunchError::Catalog(format!(
                    "agent name '{}' must not contain whitespace",
                    agent.name
                )));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(LaunchError::Catalog(format!(
                    "duplicate agent name '{}'",
                    agent.name
                )));
            }
            if agent.directory.as_os_str().is_empty() {
                return Err(LaunchError::Catalog(format!(
                    "agent '{}' has no directory",
                    agent.name
                )));
            }
            if agent
                .recipe
                .commands()
                .any(|c| c.program().trim().is_empty())
            {
                return Err(LaunchError::Catalog(format!(
                    "agent '{}' has a command without a program",
                    agent.name
                )));
            }
        }
        Ok(())
    }
}
