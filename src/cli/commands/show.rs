//! Show command - stages of one workflow

use clap::Args;
use console::style;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{join_statuses, load_context};
use crate::cli::output::{effective_format, render_rows, render_value};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::WorkflowDefinition;
use crate::schema::SchemaRegistry;

/// Show the stages of a workflow
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Workflow name (see `whflow list`)
    #[arg(required_unless_present = "schema")]
    pub workflow: Option<String>,

    /// Print the JSON schema workflow files must follow
    #[arg(long, conflicts_with = "workflow")]
    pub schema: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct StageRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub stage: String,
    pub statuses: String,
    pub terminal: String,
}

pub fn stage_rows(def: &WorkflowDefinition) -> Vec<StageRow> {
    def.stages
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let terminal: Vec<String> = stage
                .member_statuses
                .iter()
                .filter(|s| def.is_terminal_exception(s))
                .cloned()
                .collect();
            StageRow {
                index,
                stage: stage.title.clone(),
                statuses: join_statuses(&stage.member_statuses),
                terminal: if terminal.is_empty() {
                    "-".to_string()
                } else {
                    join_statuses(&terminal)
                },
            }
        })
        .collect()
}

impl ShowArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        if self.schema {
            let text = SchemaRegistry::schema_text()
                .ok_or_else(|| miette!("Embedded workflow schema is missing"))?;
            println!("{}", text.trim_end());
            return Ok(());
        }

        let (config, registry) = load_context(global)?;
        let name = self
            .workflow
            .as_deref()
            .ok_or_else(|| miette!("No workflow given"))?;
        let def = registry.get(name).into_diagnostic()?;
        let format = effective_format(global.format, &config);

        match format {
            OutputFormat::Json | OutputFormat::Yaml => {
                println!("{}", render_value(def, format)?);
            }
            OutputFormat::Csv | OutputFormat::Tsv => {
                print!("{}", render_rows(&stage_rows(def), format)?);
            }
            OutputFormat::Auto | OutputFormat::Table => {
                println!(
                    "{} ({})",
                    style(&def.name).bold(),
                    style(def.entity_type).cyan()
                );
                if let Some(description) = &def.description {
                    println!("{}", style(description).dim());
                }
                println!("{}", render_rows(&stage_rows(def), format)?);
                let order: Vec<&str> = def.status_order.iter().collect();
                println!("{} {}", style("Status order:").bold(), order.join(" < "));
            }
        }
        Ok(())
    }
}
