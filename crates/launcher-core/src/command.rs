// ABOUTME: Command lines and ordered command alternatives.
// ABOUTME: Alternatives pick the first available program, falling back to the last entry.

use crate::runner::CommandRunner;
use crate::toolchain::Toolchain;
use serde::Deserialize;
use std::fmt;

/// A program plus its arguments. Deserialized from a TOML argv array
/// such as `["npm", "run", "dev"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl TryFrom<Vec<String>> for CommandLine {
    type Error = String;

    fn try_from(argv: Vec<String>) -> Result<Self, Self::Error> {
        let mut argv = argv.into_iter();
        match argv.next() {
            Some(program) if !program.trim().is_empty() => Ok(Self {
                program,
                args: argv.collect(),
            }),
            _ => Err("command must name a program".to_string()),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Ordered list of equivalent commands, e.g. `bun install` then `npm install`.
///
/// Every entry but the last is checked; the last one is the fallback and is
/// used without checking. A single command is therefore never checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AlternativesRepr")]
pub struct Alternatives(Vec<CommandLine>);

/// TOML accepts either one argv array or an array of argv arrays.
#[derive(Deserialize)]
#[serde(untagged)]
enum AlternativesRepr {
    One(Vec<String>),
    Many(Vec<Vec<String>>),
}

impl TryFrom<AlternativesRepr> for Alternatives {
    type Error = String;

    fn try_from(repr: AlternativesRepr) -> Result<Self, Self::Error> {
        let commands = match repr {
            AlternativesRepr::One(argv) => vec![CommandLine::try_from(argv)?],
            AlternativesRepr::Many(list) => list
                .into_iter()
                .map(CommandLine::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        };
        Self::new(commands).ok_or_else(|| "at least one command is required".to_string())
    }
}

impl From<CommandLine> for Alternatives {
    fn from(command: CommandLine) -> Self {
        Self(vec![command])
    }
}

impl Alternatives {
    /// Returns None for an empty list.
    pub fn new(commands: Vec<CommandLine>) -> Option<Self> {
        if commands.is_empty() {
            None
        } else {
            Some(Self(commands))
        }
    }

    pub fn commands(&self) -> &[CommandLine] {
        &self.0
    }

    pub fn fallback(&self) -> &CommandLine {
        // Construction guarantees at least one entry.
        &self.0[self.0.len() - 1]
    }

    /// Pick the command to run: the first one found installed, else the fallback.
    pub async fn resolve<R>(&self, toolchain: &Toolchain, runner: &R) -> &CommandLine
    where
        R: CommandRunner + ?Sized,
    {
        let preferred = &self.0[..self.0.len() - 1];
        for command in preferred {
            if toolchain.available(runner, command.program()).await {
                return command;
            }
            tracing::debug!(program = command.program(), "Not available, trying next");
        }
        self.fallback()
    }
}
