//! CLI command implementations

pub mod check;
pub mod compare;
pub mod completions;
pub mod list;
pub mod position;
pub mod show;
pub mod sort;
