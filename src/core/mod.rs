//! Core module - workflow model, status tables and configuration

pub mod config;
pub mod registry;
pub mod status;
pub mod workflow;


pub use config::{Config, ConfigError};
pub use registry::{CoverageGap, WorkflowRegistry};
pub use status::EntityType;
pub use workflow::{
    compare_status, resolve_position, sort_by_progress, Stage, StageState, StatusOrder,
    WorkflowDefinition, WorkflowError, WorkflowPosition,
};
