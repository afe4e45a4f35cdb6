//! Sort command - order statuses by progress

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{load_context, read_statuses_from_stdin};
use crate::cli::output::{effective_format, render_rows};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::WorkflowDefinition;

/// Sort statuses by progress (arguments or stdin)
#[derive(Debug, Args)]
pub struct SortArgs {
    /// Workflow name (see `whflow list`)
    pub workflow: String,

    /// Statuses to sort; read from stdin when omitted
    pub statuses: Vec<String>,

    /// Farthest progressed first
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct SortedRow {
    pub rank: usize,
    pub status: String,
    pub stage: String,
}

fn sorted_row(def: &WorkflowDefinition, status: &str) -> SortedRow {
    SortedRow {
        rank: def.status_order.rank(status).unwrap_or_default(),
        status: status.to_string(),
        stage: def
            .stage_of(status)
            .map(|i| def.stages[i].title.clone())
            .unwrap_or_default(),
    }
}

impl SortArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let (config, registry) = load_context(global)?;

        let mut statuses = if self.statuses.is_empty() {
            read_statuses_from_stdin()
                .ok_or_else(|| miette!("No statuses given; pass them as arguments or pipe them on stdin"))?
        } else {
            self.statuses.clone()
        };

        registry
            .sort(&self.workflow, &mut statuses, |s| s.as_str())
            .into_diagnostic()?;
        if self.reverse {
            statuses.reverse();
        }

        let def = registry.get(&self.workflow).into_diagnostic()?;
        match effective_format(global.format, &config) {
            OutputFormat::Auto | OutputFormat::Table => {
                for status in &statuses {
                    println!("{}", status);
                }
            }
            format => {
                let rows: Vec<SortedRow> = statuses.iter().map(|s| sorted_row(def, s)).collect();
                print!("{}", render_rows(&rows, format)?);
            }
        }
        Ok(())
    }
}
