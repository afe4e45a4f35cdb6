//! Position command - where a status sits in a workflow

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{join_statuses, load_context};
use crate::cli::output::{effective_format, render_rows, render_value};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{StageState, WorkflowDefinition, WorkflowPosition};

/// Resolve a status to its position in a workflow
#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Workflow name (see `whflow list`)
    pub workflow: String,

    /// Current status of the entity, e.g. INSPECTING
    pub status: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct StageProgressRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub stage: String,
    pub state: StageState,
    pub statuses: String,
}

#[derive(Debug, Serialize)]
pub struct PositionReport<'a> {
    pub workflow: &'a str,
    pub current_stage: &'a str,
    #[serde(flatten)]
    pub position: &'a WorkflowPosition,
    pub stages: Vec<StageProgressRow>,
}

pub fn progress_rows(def: &WorkflowDefinition, position: &WorkflowPosition) -> Vec<StageProgressRow> {
    def.stages
        .iter()
        .enumerate()
        .map(|(index, stage)| StageProgressRow {
            index,
            stage: stage.title.clone(),
            state: position.stage_state(index),
            statuses: join_statuses(&stage.member_statuses),
        })
        .collect()
}

fn state_marker(state: StageState) -> String {
    match state {
        StageState::Completed => style("✓").green().to_string(),
        StageState::Current => style("●").cyan().to_string(),
        StageState::Failed => style("✗").red().to_string(),
        StageState::Pending => style("○").dim().to_string(),
        StageState::Halted => style("-").dim().to_string(),
    }
}

impl PositionArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let (config, registry) = load_context(global)?;
        let def = registry.get(&self.workflow).into_diagnostic()?;
        let position = registry
            .resolve(&self.workflow, &self.status)
            .into_diagnostic()?;
        let format = effective_format(global.format, &config);
        let rows = progress_rows(def, &position);

        match format {
            OutputFormat::Json | OutputFormat::Yaml => {
                let report = PositionReport {
                    workflow: &def.name,
                    current_stage: &def.stages[position.current_stage_index].title,
                    position: &position,
                    stages: rows,
                };
                println!("{}", render_value(&report, format)?);
            }
            OutputFormat::Csv | OutputFormat::Tsv => {
                print!("{}", render_rows(&rows, format)?);
            }
            OutputFormat::Auto | OutputFormat::Table => {
                let stage = &def.stages[position.current_stage_index];
                let headline = format!(
                    "{} is in stage {} ({})",
                    position.status, position.current_stage_index, stage.title
                );
                if position.is_terminal_exception {
                    println!("{} {}", style("✗").red(), style(headline).red());
                } else {
                    println!("{} {}", style("●").cyan(), headline);
                }
                for row in &rows {
                    println!("  {} {} {}", state_marker(row.state), row.index, row.stage);
                }
            }
        }
        Ok(())
    }
}
