//! CLI argument definitions using clap

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueHint};

use crate::application::OrgFormat;
use crate::domain::EmployeeId;

/// Organization chart engine: reparent employees with undo/redo
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Org chart file (.json or .toml)
    #[arg(short, long, global = true, env = "ORGCHART_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Directory for the local .orgchart.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the org chart as a tree
    Tree,

    /// Look up employees by id
    Find {
        /// Employee ids
        #[arg(required = true)]
        ids: Vec<EmployeeId>,
    },

    /// Show the direct supervisor of an employee
    Supervisor {
        /// Employee id
        id: EmployeeId,
    },

    /// Run moves, undos and redos in one session
    Apply {
        /// Steps: move=<employee>:<supervisor>, undo, redo
        #[arg(required = true)]
        steps: Vec<Step>,
        /// Print the resulting org chart literal instead of the tree
        #[arg(long, value_enum)]
        export: Option<OrgFormat>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,

    /// Print the config template
    Template,
}

/// One operation of an `apply` session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Move {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
    Undo,
    Redo,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "undo" => Ok(Step::Undo),
            "redo" => Ok(Step::Redo),
            other => {
                let pair = other
                    .strip_prefix("move=")
                    .ok_or_else(|| format!("unknown step '{other}' (expected move=<emp>:<sup>, undo or redo)"))?;
                let (employee, supervisor) = pair
                    .split_once(':')
                    .ok_or_else(|| format!("invalid move '{pair}' (expected <emp>:<sup>)"))?;
                let parse = |id: &str| {
                    id.trim()
                        .parse::<EmployeeId>()
                        .map_err(|e| format!("invalid employee id '{id}': {e}"))
                };
                Ok(Step::Move {
                    employee: parse(employee)?,
                    supervisor: parse(supervisor)?,
                })
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Move {
                employee,
                supervisor,
            } => write!(f, "move {employee} under {supervisor}"),
            Step::Undo => write!(f, "undo"),
            Step::Redo => write!(f, "redo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_step_strings_when_parsing_then_builds_steps() {
        assert_eq!(
            "move=2:4".parse::<Step>(),
            Ok(Step::Move {
                employee: 2,
                supervisor: 4
            })
        );
        assert_eq!("undo".parse::<Step>(), Ok(Step::Undo));
        assert_eq!(" redo ".parse::<Step>(), Ok(Step::Redo));
    }

    #[test]
    fn given_malformed_step_when_parsing_then_errors() {
        assert!("move=2".parse::<Step>().is_err());
        assert!("move=a:4".parse::<Step>().is_err());
        assert!("jump".parse::<Step>().is_err());
    }
}
