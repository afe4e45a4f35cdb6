//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::{Config, WorkflowRegistry};

/// Load configuration and the workflow registry for a command
pub fn load_context(global: &GlobalOpts) -> Result<(Config, WorkflowRegistry)> {
    let config = Config::load()
        .into_diagnostic()?
        .with_workflow_dir(global.workflow_dir.clone());
    let registry = WorkflowRegistry::load(&config).into_diagnostic()?;
    Ok((config, registry))
}

/// Read status tags from stdin if it is piped
///
/// Returns `None` when stdin is a terminal. One status per line; blank lines
/// are skipped. Enables pipelines like:
/// ```bash
/// curl -s $API/import-requests | jq -r '.[].status' | whflow sort import-request
/// ```
pub fn read_statuses_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let statuses = parse_status_lines(stdin.lock().lines().map_while(|line| line.ok()));
    if statuses.is_empty() {
        None
    } else {
        Some(statuses)
    }
}

/// Read status tags from a file, one per line
pub fn read_statuses_from_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    Ok(parse_status_lines(content.lines().map(|l| l.to_string())))
}

/// Trim lines, dropping blanks and `#` comments
pub fn parse_status_lines<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Join statuses for display
pub fn join_statuses(statuses: &[String]) -> String {
    statuses.join(", ")
}
