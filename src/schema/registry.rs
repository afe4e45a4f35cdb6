//! Schema registry - embedded workflow tables and their JSON schema

use rust_embed::Embed;

use crate::core::workflow::{WorkflowDefinition, WorkflowError};

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

#[derive(Embed)]
#[folder = "workflows/"]
struct EmbeddedWorkflows;

const WORKFLOW_SCHEMA: &str = "workflow.schema.json";

/// Compiled JSON schema for workflow definition files
pub struct SchemaRegistry {
    validator: jsonschema::Validator,
}

impl SchemaRegistry {
    /// Compile the embedded workflow schema
    pub fn new() -> Result<Self, WorkflowError> {
        let file =
            EmbeddedSchemas::get(WORKFLOW_SCHEMA).ok_or_else(|| WorkflowError::SchemaViolation {
                source_name: WORKFLOW_SCHEMA.to_string(),
                message: "embedded schema is missing".to_string(),
            })?;

        let schema: serde_json::Value =
            serde_json::from_slice(&file.data).map_err(|e| WorkflowError::SchemaViolation {
                source_name: WORKFLOW_SCHEMA.to_string(),
                message: e.to_string(),
            })?;

        let validator =
            jsonschema::validator_for(&schema).map_err(|e| WorkflowError::SchemaViolation {
                source_name: WORKFLOW_SCHEMA.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Raw text of the workflow schema, for `show --schema` style output
    pub fn schema_text() -> Option<String> {
        EmbeddedSchemas::get(WORKFLOW_SCHEMA)
            .and_then(|file| std::str::from_utf8(&file.data).ok().map(|s| s.to_string()))
    }

    /// Validate a parsed document against the workflow schema
    pub fn validate(&self, source_name: &str, value: &serde_json::Value) -> Result<(), WorkflowError> {
        let messages: Vec<String> = self
            .validator
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{} at {}", e, path)
                }
            })
            .collect();

        if messages.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::SchemaViolation {
                source_name: source_name.to_string(),
                message: messages.join("; "),
            })
        }
    }

    /// Parse YAML text into a checked workflow definition
    ///
    /// The document must match the schema and satisfy the partition
    /// invariants of [`WorkflowDefinition::validate`].
    pub fn parse_definition(
        &self,
        source_name: &str,
        content: &str,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        let value: serde_json::Value =
            serde_yml::from_str(content).map_err(|e| WorkflowError::YamlError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        self.validate(source_name, &value)?;

        let definition: WorkflowDefinition =
            serde_json::from_value(value).map_err(|e| WorkflowError::YamlError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        definition.validate()?;
        Ok(definition)
    }
}

/// Embedded workflow files as (file name, contents), sorted by file name
pub fn builtin_workflow_sources() -> Vec<(String, String)> {
    let mut sources: Vec<(String, String)> = EmbeddedWorkflows::iter()
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .filter_map(|name| {
            let file = EmbeddedWorkflows::get(&name)?;
            let content = std::str::from_utf8(&file.data).ok()?.to_string();
            Some((name.to_string(), content))
        })
        .collect();
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    sources
}
