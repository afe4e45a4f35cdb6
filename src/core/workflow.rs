//! Status workflow model
//!
//! A workflow definition groups the status values of one entity type into
//! ordered stages. Given a current status, [`resolve_position`] works out which
//! stage the entity is in, which stages are behind it and which are still ahead.
//! Terminal-exception statuses (cancelled, rejected) halt the progression at
//! their own stage.
//!
//! Everything in this module is pure: no I/O, no logging, no shared state.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::core::status::{self, EntityType};

/// Errors raised by the workflow model and the registry built on it
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Status '{status}' is not part of workflow '{workflow}'")]
    StatusNotInWorkflow { status: String, workflow: String },

    #[error("Unknown status '{status}' in status order")]
    UnknownStatus { status: String },

    #[error("Unknown workflow: {name}")]
    UnknownWorkflow { name: String },

    #[error("Invalid workflow definition '{workflow}': {reason}")]
    InvalidDefinition { workflow: String, reason: String },

    #[error("Workflow file {source_name} does not match the workflow schema: {message}")]
    SchemaViolation {
        source_name: String,
        message: String,
    },

    #[error("Failed to parse YAML in {source_name}: {message}")]
    YamlError {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WorkflowError {
    /// Stable identifier for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::StatusNotInWorkflow { .. } => "STATUS_NOT_IN_WORKFLOW",
            WorkflowError::UnknownStatus { .. } => "UNKNOWN_STATUS",
            WorkflowError::UnknownWorkflow { .. } => "UNKNOWN_WORKFLOW",
            WorkflowError::InvalidDefinition { .. } => "INVALID_DEFINITION",
            WorkflowError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            WorkflowError::YamlError { .. } => "YAML_ERROR",
            WorkflowError::IoError(_) => "IO_ERROR",
        }
    }

    /// True for the two data-drift errors (status missing from a table)
    pub fn is_drift(&self) -> bool {
        matches!(
            self,
            WorkflowError::StatusNotInWorkflow { .. } | WorkflowError::UnknownStatus { .. }
        )
    }
}

/// A named phase of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Display label
    pub title: String,

    /// Status values that place an entity in this stage
    #[serde(rename = "statuses")]
    pub member_statuses: Vec<String>,
}

impl Stage {
    pub fn new(title: impl Into<String>, statuses: &[&str]) -> Self {
        Self {
            title: title.into(),
            member_statuses: statuses.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn contains(&self, status: &str) -> bool {
        self.member_statuses.iter().any(|s| s == status)
    }
}

/// Total order over every status of a workflow, used to rank progress
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusOrder(Vec<String>);

impl StatusOrder {
    pub fn new(statuses: &[&str]) -> Self {
        Self(statuses.iter().map(|s| s.to_string()).collect())
    }

    /// Index of a status in the order, if present
    pub fn rank(&self, status: &str) -> Option<usize> {
        self.0.iter().position(|s| s == status)
    }

    pub fn contains(&self, status: &str) -> bool {
        self.rank(status).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    fn require_rank(&self, status: &str) -> Result<usize, WorkflowError> {
        self.rank(status).ok_or_else(|| WorkflowError::UnknownStatus {
            status: status.to_string(),
        })
    }
}

impl From<Vec<String>> for StatusOrder {
    fn from(statuses: Vec<String>) -> Self {
        Self(statuses)
    }
}

/// Ordered stage table for one entity type (or one page variant of it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Registry key, e.g. "import-request"
    pub name: String,

    pub entity_type: EntityType,

    /// Page variant this table was taken from, if the entity type has several
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub stages: Vec<Stage>,

    pub status_order: StatusOrder,

    /// Statuses that exit the normal progression
    #[serde(default)]
    pub terminal_exceptions: Vec<String>,
}

impl WorkflowDefinition {
    pub fn new(
        name: impl Into<String>,
        entity_type: EntityType,
        stages: Vec<Stage>,
        status_order: StatusOrder,
        terminal_exceptions: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            entity_type,
            variant: None,
            description: None,
            stages,
            status_order,
            terminal_exceptions: terminal_exceptions.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Index of the stage containing a status
    pub fn stage_of(&self, status: &str) -> Option<usize> {
        self.stages.iter().position(|stage| stage.contains(status))
    }

    pub fn is_terminal_exception(&self, status: &str) -> bool {
        self.terminal_exceptions.iter().any(|s| s == status)
    }

    /// Every status that appears in some stage, in stage order
    pub fn member_statuses(&self) -> impl Iterator<Item = &str> {
        self.stages
            .iter()
            .flat_map(|stage| stage.member_statuses.iter().map(|s| s.as_str()))
    }

    /// Check the partition invariants of the table
    ///
    /// Stages must be non-empty and pairwise disjoint, the status order must be
    /// a permutation of all stage members, and terminal exceptions must be
    /// stage members that agree with the registered terminal-exception set.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let invalid = |reason: String| WorkflowError::InvalidDefinition {
            workflow: self.name.clone(),
            reason,
        };

        if self.stages.is_empty() {
            return Err(invalid("workflow has no stages".to_string()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for stage in &self.stages {
            if stage.member_statuses.is_empty() {
                return Err(invalid(format!("stage '{}' has no statuses", stage.title)));
            }
            for status in &stage.member_statuses {
                if !seen.insert(status.as_str()) {
                    return Err(invalid(format!(
                        "status '{}' appears in more than one stage",
                        status
                    )));
                }
            }
        }

        let mut ordered: HashSet<&str> = HashSet::new();
        for status in self.status_order.iter() {
            if !ordered.insert(status) {
                return Err(invalid(format!(
                    "status '{}' appears twice in status_order",
                    status
                )));
            }
            if !seen.contains(status) {
                return Err(invalid(format!(
                    "status_order lists '{}' which belongs to no stage",
                    status
                )));
            }
        }
        if let Some(missing) = self.member_statuses().find(|s| !ordered.contains(s)) {
            return Err(invalid(format!(
                "status '{}' is missing from status_order",
                missing
            )));
        }

        if let Some(stray) = self
            .terminal_exceptions
            .iter()
            .find(|s| !seen.contains(s.as_str()))
        {
            return Err(invalid(format!(
                "terminal exception '{}' belongs to no stage",
                stray
            )));
        }

        // Statuses of the entity type follow the registered terminal set;
        // statuses added by a custom table are free to choose.
        let known = self.entity_type.statuses();
        for member in self.member_statuses() {
            let registered = status::is_terminal_exception(member);
            let governed = registered || known.contains(&member);
            if governed && self.is_terminal_exception(member) != registered {
                return Err(invalid(if registered {
                    format!("'{}' must be listed as a terminal exception", member)
                } else {
                    format!(
                        "'{}' is not a terminal exception for {}",
                        member, self.entity_type
                    )
                }));
            }
        }

        Ok(())
    }
}

/// How a single stage should be rendered for a given position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    Completed,
    Current,
    /// Current stage reached through a terminal-exception status
    Failed,
    Pending,
    /// After a terminal exception: neither completed nor pending
    Halted,
}

impl std::fmt::Display for StageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageState::Completed => write!(f, "completed"),
            StageState::Current => write!(f, "current"),
            StageState::Failed => write!(f, "failed"),
            StageState::Pending => write!(f, "pending"),
            StageState::Halted => write!(f, "halted"),
        }
    }
}

/// Where an entity sits in its workflow; computed on demand, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowPosition {
    pub status: String,
    pub current_stage_index: usize,
    /// Index of the status in the workflow's status order
    pub status_rank: usize,
    pub is_terminal_exception: bool,
    pub completed_stage_indices: BTreeSet<usize>,
    pub pending_stage_indices: BTreeSet<usize>,
}

impl WorkflowPosition {
    pub fn stage_state(&self, index: usize) -> StageState {
        if self.completed_stage_indices.contains(&index) {
            StageState::Completed
        } else if index == self.current_stage_index {
            if self.is_terminal_exception {
                StageState::Failed
            } else {
                StageState::Current
            }
        } else if self.pending_stage_indices.contains(&index) {
            StageState::Pending
        } else {
            StageState::Halted
        }
    }

    /// State of every stage, in order
    pub fn stage_states(&self, stage_count: usize) -> Vec<StageState> {
        (0..stage_count).map(|i| self.stage_state(i)).collect()
    }
}

/// Resolve a status against a workflow definition
///
/// Fails with [`WorkflowError::StatusNotInWorkflow`] when no stage contains the
/// status; the caller decides how to render that, no stage is guessed.
pub fn resolve_position(
    definition: &WorkflowDefinition,
    status_order: &StatusOrder,
    current_status: &str,
) -> Result<WorkflowPosition, WorkflowError> {
    let current_stage_index =
        definition
            .stage_of(current_status)
            .ok_or_else(|| WorkflowError::StatusNotInWorkflow {
                status: current_status.to_string(),
                workflow: definition.name.clone(),
            })?;
    let status_rank = status_order.require_rank(current_status)?;
    let is_terminal_exception = definition.is_terminal_exception(current_status);

    let completed_stage_indices = (0..current_stage_index).collect();
    let pending_stage_indices = if is_terminal_exception {
        BTreeSet::new()
    } else {
        (current_stage_index + 1..definition.stages.len()).collect()
    };

    Ok(WorkflowPosition {
        status: current_status.to_string(),
        current_stage_index,
        status_rank,
        is_terminal_exception,
        completed_stage_indices,
        pending_stage_indices,
    })
}

/// Compare two statuses by their position in the status order
pub fn compare_status(
    status_order: &StatusOrder,
    a: &str,
    b: &str,
) -> Result<Ordering, WorkflowError> {
    let rank_a = status_order.require_rank(a)?;
    let rank_b = status_order.require_rank(b)?;
    Ok(rank_a.cmp(&rank_b))
}

/// Stable-sort items by how far their status has progressed
///
/// Every status is checked before anything moves, so an unknown status leaves
/// `items` untouched.
pub fn sort_by_progress<T, F>(
    status_order: &StatusOrder,
    items: &mut [T],
    status_of: F,
) -> Result<(), WorkflowError>
where
    F: Fn(&T) -> &str,
{
    for item in items.iter() {
        status_order.require_rank(status_of(item))?;
    }
    items.sort_by_key(|item| status_order.rank(status_of(item)).unwrap_or(usize::MAX));
    Ok(())
}
