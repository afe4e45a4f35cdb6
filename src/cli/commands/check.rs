//! Check command - workflow completeness and drift report

use clap::Args;
use console::style;
use miette::{miette, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use crate::cli::helpers::{load_context, read_statuses_from_file};
use crate::cli::output::{effective_format, render_rows};
use crate::cli::{GlobalOpts, OutputFormat};

/// Check workflow tables for completeness and drift
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Limit the drift report to one workflow
    #[arg(long, short = 'w')]
    pub workflow: Option<String>,

    /// File of backend-reported statuses, one per line
    #[arg(long, short = 's', requires = "workflow")]
    pub statuses: Option<PathBuf>,

    /// Report gaps without failing
    #[arg(long)]
    pub allow_gaps: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct GapRow {
    pub scope: String,
    pub status: String,
    pub problem: String,
}

impl CheckArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        // Loading validates every table against the schema and partition rules
        let (config, registry) = load_context(global)?;
        let format = effective_format(global.format, &config);

        let mut gaps: Vec<GapRow> = registry
            .check_entity_coverage()
            .into_iter()
            .map(|(entity, status)| GapRow {
                scope: entity.to_string(),
                status,
                problem: "not covered by any workflow".to_string(),
            })
            .collect();

        if let Some(workflow) = &self.workflow {
            let def = registry.get(workflow).map_err(|e| miette!("{}", e))?;
            let statuses: Vec<String> = match &self.statuses {
                Some(path) => read_statuses_from_file(path)?,
                None => def.status_order.iter().map(|s| s.to_string()).collect(),
            };
            let drift = registry
                .check_coverage(workflow, statuses.iter().map(|s| s.as_str()))
                .map_err(|e| miette!("{}", e))?;
            gaps.extend(drift.into_iter().map(|gap| GapRow {
                scope: gap.workflow,
                status: gap.status,
                problem: "status not in workflow".to_string(),
            }));
        }

        match format {
            OutputFormat::Auto | OutputFormat::Table => {
                if gaps.is_empty() {
                    println!(
                        "{} {} workflow(s) checked, no gaps",
                        style("✓").green(),
                        registry.len()
                    );
                } else {
                    println!("{}", render_rows(&gaps, format)?);
                }
            }
            _ => print!("{}", render_rows(&gaps, format)?),
        }

        if !gaps.is_empty() && config.strict && !self.allow_gaps {
            return Err(miette!("{} status gap(s) found", gaps.len()));
        }
        Ok(())
    }
}
