//! List command - registered workflows

use clap::Args;
use miette::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::load_context;
use crate::cli::output::{effective_format, render_rows};
use crate::cli::GlobalOpts;
use crate::core::{EntityType, WorkflowDefinition};

/// List registered workflows
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only workflows for this entity type (import-request, export-request, inspection-request)
    #[arg(long, short = 't')]
    pub entity_type: Option<EntityType>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct WorkflowRow {
    pub name: String,
    pub entity: String,
    pub variant: String,
    pub stages: usize,
    pub statuses: usize,
}

impl From<&WorkflowDefinition> for WorkflowRow {
    fn from(def: &WorkflowDefinition) -> Self {
        Self {
            name: def.name.clone(),
            entity: def.entity_type.to_string(),
            variant: def.variant.clone().unwrap_or_else(|| "-".to_string()),
            stages: def.stages.len(),
            statuses: def.status_order.len(),
        }
    }
}

impl ListArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let (config, registry) = load_context(global)?;
        let format = effective_format(global.format, &config);

        let rows: Vec<WorkflowRow> = registry
            .iter()
            .filter(|def| self.entity_type.map_or(true, |t| def.entity_type == t))
            .map(WorkflowRow::from)
            .collect();

        println!("{}", render_rows(&rows, format)?);
        Ok(())
    }
}
