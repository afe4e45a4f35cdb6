//! Warehouse Flow: status workflow model for warehouse requests
//!
//! Import, export and inspection requests move through ordered stages. This
//! crate holds the stage tables for each request type and resolves a current
//! status to a position (current stage, completed stages, pending stages,
//! terminal exception) that progress views can render directly.

pub mod cli;
pub mod core;
pub mod logging;
pub mod schema;
