//! Embedded workflow tables and schema validation

pub mod registry;

pub use registry::{builtin_workflow_sources, SchemaRegistry};
