//! Workflow registry - one immutable table per workflow name
//!
//! The registry is built once at startup from the embedded workflow files plus
//! any definitions found in the configured workflow directory, then shared
//! read-only. Drift errors surfaced through it are logged before they are
//! returned so a mismatch between backend statuses and the tables shows up in
//! the logs even when the caller renders a fallback.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::core::config::Config;
use crate::core::status::EntityType;
use crate::core::workflow::{
    compare_status, resolve_position, sort_by_progress, WorkflowDefinition, WorkflowError,
    WorkflowPosition,
};
use crate::schema::registry::{builtin_workflow_sources, SchemaRegistry};

/// Registered workflow definitions keyed by name
#[derive(Debug, Clone, Default)]
pub struct WorkflowRegistry {
    workflows: BTreeMap<String, WorkflowDefinition>,
}

/// Status that failed to resolve during a coverage check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub workflow: String,
    pub status: String,
}

impl WorkflowRegistry {
    /// Registry holding only the embedded workflow tables
    pub fn builtin() -> Result<Self, WorkflowError> {
        let schemas = SchemaRegistry::new()?;
        let mut registry = Self::default();
        for (source_name, content) in builtin_workflow_sources() {
            let definition = schemas.parse_definition(&source_name, &content)?;
            tracing::debug!(workflow = %definition.name, source = %source_name, "loaded builtin workflow");
            registry.insert(definition);
        }
        Ok(registry)
    }

    /// Builtin tables plus the definitions in `config.workflow_dir`
    pub fn load(config: &Config) -> Result<Self, WorkflowError> {
        let mut registry = Self::builtin()?;
        if let Some(dir) = &config.workflow_dir {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Load every `*.yaml`/`*.yml` file under `dir`
    ///
    /// A definition whose name matches an existing one replaces it.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, WorkflowError> {
        if !dir.is_dir() {
            return Err(WorkflowError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("workflow directory not found: {}", dir.display()),
            )));
        }

        let schemas = SchemaRegistry::new()?;
        let mut loaded = 0;
        let mut paths: Vec<_> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|ext| ext.to_str()),
                    Some("yaml") | Some("yml")
                )
            })
            .collect();
        paths.sort();

        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let source_name = path.display().to_string();
            let definition = schemas.parse_definition(&source_name, &content)?;
            if self.workflows.contains_key(&definition.name) {
                tracing::info!(workflow = %definition.name, source = %source_name, "overriding workflow");
            } else {
                tracing::debug!(workflow = %definition.name, source = %source_name, "loaded workflow");
            }
            self.insert(definition);
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn insert(&mut self, definition: WorkflowDefinition) {
        self.workflows.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Result<&WorkflowDefinition, WorkflowError> {
        self.workflows
            .get(name)
            .ok_or_else(|| WorkflowError::UnknownWorkflow {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.workflows.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowDefinition> {
        self.workflows.values()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// All workflows registered for an entity type
    pub fn for_entity(&self, entity_type: EntityType) -> Vec<&WorkflowDefinition> {
        self.workflows
            .values()
            .filter(|d| d.entity_type == entity_type)
            .collect()
    }

    /// Resolve a status against a named workflow, logging drift
    pub fn resolve(&self, workflow: &str, status: &str) -> Result<WorkflowPosition, WorkflowError> {
        let definition = self.get(workflow)?;
        resolve_position(definition, &definition.status_order, status).inspect_err(|e| {
            if e.is_drift() {
                tracing::warn!(workflow, status, code = e.code(), "status drift: {}", e);
            }
        })
    }

    /// Compare two statuses in a named workflow's order, logging drift
    pub fn compare(&self, workflow: &str, a: &str, b: &str) -> Result<Ordering, WorkflowError> {
        let definition = self.get(workflow)?;
        compare_status(&definition.status_order, a, b).inspect_err(|e| {
            tracing::warn!(workflow, a, b, code = e.code(), "status drift: {}", e);
        })
    }

    /// Sort items by progress in a named workflow, logging drift
    pub fn sort<T, F>(&self, workflow: &str, items: &mut [T], status_of: F) -> Result<(), WorkflowError>
    where
        F: Fn(&T) -> &str,
    {
        let definition = self.get(workflow)?;
        sort_by_progress(&definition.status_order, items, status_of).inspect_err(|e| {
            tracing::warn!(workflow, code = e.code(), "status drift: {}", e);
        })
    }

    /// Statuses from `statuses` that do not resolve in `workflow`
    pub fn check_coverage<'a, I>(&self, workflow: &str, statuses: I) -> Result<Vec<CoverageGap>, WorkflowError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let definition = self.get(workflow)?;
        let gaps: Vec<CoverageGap> = statuses
            .into_iter()
            .filter(|status| definition.stage_of(status).is_none())
            .map(|status| CoverageGap {
                workflow: workflow.to_string(),
                status: status.to_string(),
            })
            .collect();

        for gap in &gaps {
            tracing::warn!(workflow, status = %gap.status, "status not covered by workflow");
        }
        tracing::info!(workflow, gaps = gaps.len(), "coverage check complete");
        Ok(gaps)
    }

    /// Entity statuses not covered by any workflow registered for the entity
    ///
    /// Every constant in [`EntityType::statuses`] must land in at least one of
    /// the entity's workflows; a gap here means a status can reach the pages
    /// with no table able to render it.
    pub fn check_entity_coverage(&self) -> Vec<(EntityType, String)> {
        let mut gaps = Vec::new();
        for entity_type in EntityType::all() {
            let definitions = self.for_entity(*entity_type);
            for status in entity_type.statuses() {
                if !definitions.iter().any(|d| d.stage_of(status).is_some()) {
                    tracing::warn!(entity = %entity_type, status, "status not covered by any workflow");
                    gaps.push((*entity_type, status.to_string()));
                }
            }
        }
        gaps
    }
}
