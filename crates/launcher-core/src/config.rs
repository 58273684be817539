// ABOUTME: Launcher configuration loaded from ~/.config/agents-launcher/config.toml.
// ABOUTME: Sets the root directory, required env vars, and extra or overriding agents.

use crate::catalog::{AgentSpec, Catalog};
use crate::env::DEFAULT_REQUIRED_ENV;
use crate::error::{LaunchError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the agent checkouts. `~` is expanded.
    #[serde(default)]
    pub root: Option<String>,

    /// Environment variables to warn about when unset.
    #[serde(default = "default_required_env")]
    pub required_env: Vec<String>,

    /// Agents merged over the built-in catalog.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

fn default_required_env() -> Vec<String> {
    DEFAULT_REQUIRED_ENV.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            required_env: default_required_env(),
            agents: Vec::new(),
        }
    }
}

impl Config {
    /// Default location: `~/.config/agents-launcher/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agents-launcher").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No launcher config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            LaunchError::Config(format!("Failed to read config from {:?}: {}", path, e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded launcher config");

        Self::from_toml(&contents)
    }

    /// Parse config text. `$VAR` and `${VAR}` are expanded in `root` and
    /// `required_env` only; agent commands are kept literal.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| LaunchError::Config(format!("Failed to parse config: {}", e)))?;

        config.root = config.root.as_deref().map(expand_env);
        config.required_env = config.required_env.iter().map(|v| expand_env(v)).collect();
        Ok(config)
    }

    /// Built-in agents with this config's agents merged on top.
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::builtin()?.merge(self.agents.iter().cloned());
        catalog.validate()?;
        Ok(catalog)
    }

    /// Configured root with `~` expanded, if set and non-empty.
    pub fn root_dir(&self) -> Option<PathBuf> {
        self.root
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(|r| PathBuf::from(shellexpand::tilde(r).into_owned()))
    }

    /// Pick the launcher root: explicit override, then config, then the current directory.
    pub fn resolve_root(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit.or_else(|| self.root_dir()) {
            Some(root) => Ok(root),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// Undefined vars expand to empty with a warning.
fn expand_env(value: &str) -> String {
    shellexpand::env_with_context_no_errors(value, |var: &str| match std::env::var(var) {
        Ok(val) => Some(val),
        Err(_) => {
            warn!(
                variable = %var,
                "Environment variable not defined, using empty string"
            );
            Some(String::new())
        }
    })
    .into_owned()
}
