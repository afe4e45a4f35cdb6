//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::compare::CompareArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::list::ListArgs;
use crate::cli::commands::position::PositionArgs;
use crate::cli::commands::show::ShowArgs;
use crate::cli::commands::sort::SortArgs;

/// Warehouse Flow - status workflow tables for import, export and inspection requests
#[derive(Debug, Parser)]
#[command(name = "whflow", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, env = "WHFLOW_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Directory of additional workflow definitions (*.yaml)
    #[arg(long, global = true, env = "WHFLOW_WORKFLOW_DIR")]
    pub workflow_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered workflows
    List(ListArgs),

    /// Show the stages of a workflow
    Show(ShowArgs),

    /// Resolve a status to its position in a workflow
    Position(PositionArgs),

    /// Compare two statuses by progress
    Compare(CompareArgs),

    /// Sort statuses by progress (arguments or stdin)
    Sort(SortArgs),

    /// Check workflow tables for completeness and drift
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for terminals
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <OutputFormat as ValueEnum>::from_str(s, true)
    }
}
