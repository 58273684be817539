// ABOUTME: Entry point for the `agents` launcher.
// ABOUTME: Lists demo agents, prompts for one, then installs and starts it.

mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use launcher_core::{env, Config, LaunchError, Launcher, SystemRunner};
use menu::Outcome;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agents")]
#[command(about = "Run any of the demo agent applications from one place")]
#[command(version)]
struct Cli {
    /// Agent to run (omit for an interactive menu)
    agent: Option<String>,

    /// List agent names and exit
    #[arg(long)]
    list: bool,

    /// Directory containing the agent checkouts (defaults to the current directory)
    #[arg(long, env = "AGENTS_ROOT")]
    root: Option<PathBuf>,

    /// Path to the launcher config file
    #[arg(long, env = "AGENTS_CONFIG")]
    config: Option<PathBuf>,

    /// Show the bootstrap steps without running them
    #[arg(long)]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.verbose {
        launcher_log::init_verbose();
    } else {
        launcher_log::init();
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    };

    // A cancelled prompt may leave a blocking stdin read behind; exit without
    // waiting for the runtime to drain it.
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load launcher config")?;
    let catalog = config.catalog()?;

    env::warn_missing(&config.required_env);

    let agent = match menu::from_args(&catalog, cli.list, cli.agent.as_deref()) {
        Outcome::Launch(agent) => agent,
        Outcome::Exit(exit) => return Ok(exit.emit()),
        Outcome::Prompt => {
            print!("{}", menu::render_list(&catalog));
            println!();
            match menu::from_selection(&catalog, menu::prompt().await?) {
                Outcome::Launch(agent) => agent,
                Outcome::Exit(exit) => return Ok(exit.emit()),
                Outcome::Prompt => return Ok(0),
            }
        }
    };

    let root = config.resolve_root(cli.root)?;
    let launcher = Launcher::new(root, SystemRunner);

    if cli.dry_run {
        let steps = launcher.plan(agent).await?;
        print!(
            "{}",
            menu::render_plan(agent, &launcher.agent_dir(agent), &steps)
        );
        return Ok(0);
    }

    launcher
        .launch(agent)
        .await
        .with_context(|| format!("Failed to run {}", agent.name))?;

    Ok(0)
}

/// Child exit codes pass through; everything else is 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LaunchError>()
        .map(LaunchError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_direct_run() {
        let cli = Cli::try_parse_from(["agents", "excel-demo", "--dry-run", "-v"]).unwrap();
        assert_eq!(cli.agent.as_deref(), Some("excel-demo"));
        assert!(cli.dry_run);
        assert!(!cli.list);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_list_with_name() {
        let cli = Cli::try_parse_from(["agents", "--list", "email-agent"]).unwrap();
        assert!(cli.list);
        assert_eq!(cli.agent.as_deref(), Some("email-agent"));
    }

    #[test]
    fn test_parse_root_flag() {
        let cli = Cli::try_parse_from(["agents", "--root", "/demos"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/demos")));
        assert!(cli.agent.is_none());
    }

    #[test]
    fn test_exit_code_forwards_child_code_through_context() {
        let err = anyhow::Error::new(LaunchError::CommandFailed {
            program: "npm".to_string(),
            code: 7,
        })
        .context("Failed to run excel-demo");
        assert_eq!(exit_code(&err), 7);
    }

    #[test]
    fn test_exit_code_other_errors() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
        let err = anyhow::Error::new(LaunchError::UnknownAgent("x".to_string()));
        assert_eq!(exit_code(&err), 1);
    }
}
