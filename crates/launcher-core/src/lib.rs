// ABOUTME: Core library for the agents launcher.
// ABOUTME: Catalog of demo agents, their bootstrap recipes, and the process runner.

//! # launcher-core
//!
//! Everything the `agents` binary needs besides argument parsing:
//!
//! - [`Catalog`]: the named agents, built-in plus user additions
//! - [`Recipe`]: per-agent bootstrap (dirs, env file, tools, install, start)
//! - [`Config`]: `~/.config/agents-launcher/config.toml`
//! - [`CommandRunner`]: the seam to the operating system
//! - [`Launcher`]: plans and executes a recipe in the agent's directory

pub mod catalog;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod launcher;
pub mod recipe;
pub mod runner;
pub mod toolchain;

pub use catalog::{AgentSpec, Catalog};
pub use command::{Alternatives, CommandLine};
pub use config::Config;
pub use error::{LaunchError, Result};
pub use launcher::Launcher;
pub use recipe::{EnvFile, Install, Recipe, Requirement, Step};
pub use runner::{CommandRunner, SystemRunner};
pub use toolchain::Toolchain;
