// ABOUTME: Listing and interactive selection for the agents launcher.
// ABOUTME: Reads one line from stdin; EOF and Ctrl+C both cancel quietly.

use anyhow::{Context, Result};
use launcher_core::{AgentSpec, Catalog, Step};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

pub const PROMPT: &str = "Enter agent name (or Ctrl+C to cancel): ";

/// What the user typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Agent(String),
    Empty,
    Cancelled,
}

/// Agent names and descriptions, one per line, in catalog order.
pub fn render_list(catalog: &Catalog) -> String {
    let mut out = String::from("Agents (use: agents <name>):\n");
    for agent in catalog.iter() {
        let _ = writeln!(out, "  {:<16} {}", agent.name, agent.description);
    }
    out
}

/// Numbered bootstrap steps for `--dry-run`.
pub fn render_plan(agent: &AgentSpec, dir: &Path, steps: &[Step]) -> String {
    let mut out = format!("Plan for {} in {}:\n", agent.name, dir.display());
    for (i, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}

/// Where argument handling or the prompt leaves the launcher.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<'a> {
    Launch(&'a AgentSpec),
    /// No agent named on the command line: show the menu.
    Prompt,
    Exit(Exit),
}

/// Text to print before exiting with `code`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Exit {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Exit {
    pub fn emit(&self) -> i32 {
        print!("{}", self.stdout);
        eprint!("{}", self.stderr);
        self.code
    }
}

/// Decide from the command line alone. `--list` wins over a name.
pub fn from_args<'a>(catalog: &'a Catalog, list: bool, agent: Option<&str>) -> Outcome<'a> {
    if list {
        return Outcome::Exit(Exit {
            stdout: render_list(catalog),
            ..Exit::default()
        });
    }

    match agent {
        None => Outcome::Prompt,
        Some(name) => match catalog.get(name) {
            Ok(agent) => Outcome::Launch(agent),
            Err(_) => Outcome::Exit(Exit {
                code: 1,
                stdout: render_list(catalog),
                stderr: format!("Unknown agent: {}\n", name.trim().to_lowercase()),
            }),
        },
    }
}

/// Decide from what was typed at the menu prompt.
pub fn from_selection(catalog: &Catalog, selection: Selection) -> Outcome<'_> {
    match selection {
        Selection::Agent(name) => match catalog.get(&name) {
            Ok(agent) => Outcome::Launch(agent),
            Err(_) => Outcome::Exit(Exit {
                code: 1,
                stderr: format!("Unknown agent: {}. Use --list to see names.\n", name),
                ..Exit::default()
            }),
        },
        Selection::Empty => Outcome::Exit(Exit::default()),
        // Ends the unfinished prompt line.
        Selection::Cancelled => Outcome::Exit(Exit {
            stdout: "\n".to_string(),
            ..Exit::default()
        }),
    }
}

pub fn parse_choice(line: &str) -> Selection {
    let choice = line.trim().to_lowercase();
    if choice.is_empty() {
        Selection::Empty
    } else {
        Selection::Agent(choice)
    }
}

/// Print the prompt and wait for one line or Ctrl+C.
pub async fn prompt() -> Result<Selection> {
    print!("{}", PROMPT);
    io::stdout().flush()?;

    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        io::stdin().read_line(&mut line).map(|n| (n, line))
    });

    tokio::select! {
        res = read => {
            let (n, line) = res.context("stdin reader panicked")??;
            if n == 0 {
                return Ok(Selection::Cancelled);
            }
            Ok(parse_choice(&line))
        }
        _ = tokio::signal::ctrl_c() => Ok(Selection::Cancelled),
    }
}
