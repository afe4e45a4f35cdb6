//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get a whflow command isolated from the user's config
pub fn whflow(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("whflow"));
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env("HOME", tmp.path())
        .env_remove("WHFLOW_FORMAT")
        .env_remove("WHFLOW_WORKFLOW_DIR")
        .env_remove("WHFLOW_LOG");
    cmd
}

/// Empty working directory for a test
pub fn setup() -> TempDir {
    TempDir::new().unwrap()
}

/// Write `.whflow/config.yaml` in the test directory
pub fn write_project_config(tmp: &TempDir, content: &str) {
    let dir = tmp.path().join(".whflow");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), content).unwrap();
}

/// Write a workflow definition file into `dir`
pub fn write_workflow(dir: &Path, file_name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file_name), content).unwrap();
}

/// Inspection workflow with an extra archive stage
pub const ARCHIVING_INSPECTION: &str = r#"
name: inspection-request
entity_type: inspection-request
variant: archiving
stages:
  - title: Request created
    statuses: [PENDING]
  - title: In Inspection
    statuses: [INSPECTING, CANCELLED]
  - title: Inspection Report
    statuses: [INSPECTED]
  - title: Archived
    statuses: [ARCHIVED]
status_order: [PENDING, CANCELLED, INSPECTING, INSPECTED, ARCHIVED]
terminal_exceptions: [CANCELLED]
"#;
