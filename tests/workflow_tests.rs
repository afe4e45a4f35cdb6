//! Workflow model tests against the registered tables

mod common;

use common::{setup, whflow, write_project_config, write_workflow, ARCHIVING_INSPECTION};
use predicates::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use whflow::core::status::{self, EntityType};
use whflow::core::{compare_status, resolve_position, Config, WorkflowRegistry};

fn set(indices: &[usize]) -> BTreeSet<usize> {
    indices.iter().copied().collect()
}

// ============================================================================
// Registered tables
// ============================================================================

#[test]
fn test_every_status_constant_resolves_somewhere() {
    let registry = WorkflowRegistry::builtin().unwrap();
    for entity in EntityType::all() {
        for status in entity.statuses() {
            let resolved = registry
                .for_entity(*entity)
                .iter()
                .any(|def| resolve_position(def, &def.status_order, status).is_ok());
            assert!(resolved, "{} has no stage for {}", entity, status);
        }
    }
}

#[test]
fn test_import_request_inspecting() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let def = registry.get("import-request").unwrap();
    let pos = resolve_position(def, &def.status_order, status::INSPECTING).unwrap();

    assert_eq!(pos.current_stage_index, 2);
    assert_eq!(def.stages[2].title, "In Inspection");
    assert_eq!(pos.completed_stage_indices, set(&[0, 1]));
    assert_eq!(pos.pending_stage_indices, set(&[3]));
    assert!(!pos.is_terminal_exception);
}

#[test]
fn test_import_request_rejected() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let def = registry.get("import-request").unwrap();
    let pos = resolve_position(def, &def.status_order, status::REJECTED).unwrap();

    assert_eq!(pos.current_stage_index, 1);
    assert_eq!(def.stages[1].title, "Import request approval");
    assert!(pos.is_terminal_exception);
    assert!(pos.pending_stage_indices.is_empty());
}

#[test]
fn test_canceled_typo_is_caught() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let def = registry.get("import-request").unwrap();
    let err = resolve_position(def, &def.status_order, status::CANCELED).unwrap_err();
    assert_eq!(err.code(), "STATUS_NOT_IN_WORKFLOW");
}

#[test]
fn test_pending_variant_uses_canceled() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let pos = registry
        .resolve("import-request-pending", status::CANCELED)
        .unwrap();
    assert_eq!(pos.current_stage_index, 1);
    assert!(pos.is_terminal_exception);
}

#[test]
fn test_inspection_request_positions() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let pos = registry
        .resolve("inspection-request", status::INSPECTED)
        .unwrap();
    assert_eq!(pos.current_stage_index, 2);
    assert_eq!(pos.completed_stage_indices, set(&[0, 1]));

    let pos = registry
        .resolve("inspection-request", status::CANCELLED)
        .unwrap();
    assert_eq!(pos.current_stage_index, 1);
    assert!(pos.pending_stage_indices.is_empty());
}

#[test]
fn test_compare_across_branches() {
    let registry = WorkflowRegistry::builtin().unwrap();
    let def = registry.get("export-request").unwrap();
    let order = &def.status_order;

    // Exceptional statuses still get a deterministic place
    assert_eq!(
        compare_status(order, status::CANCELLED, status::PENDING).unwrap(),
        Ordering::Greater
    );
    assert_eq!(
        compare_status(order, status::CANCELLED, status::EXPORTING).unwrap(),
        Ordering::Less
    );
    assert!(compare_status(order, status::CANCELED, status::PENDING).is_err());
}

#[test]
fn test_sort_entities_by_progress() {
    #[derive(Debug)]
    struct Request {
        code: &'static str,
        status: &'static str,
    }

    let registry = WorkflowRegistry::builtin().unwrap();
    let mut requests = vec![
        Request { code: "EX-3", status: status::PRODUCTION_APPROVED },
        Request { code: "EX-1", status: status::PENDING },
        Request { code: "EX-2", status: status::EXPORTING },
    ];
    registry
        .sort("export-request", &mut requests, |r| r.status)
        .unwrap();
    let codes: Vec<&str> = requests.iter().map(|r| r.code).collect();
    assert_eq!(codes, vec!["EX-1", "EX-2", "EX-3"]);
}

// ============================================================================
// Configured workflow directory
// ============================================================================

#[test]
fn test_registry_load_from_config() {
    let tmp = setup();
    let dir = tmp.path().join("workflows");
    write_workflow(&dir, "inspection.yaml", ARCHIVING_INSPECTION);

    let config = Config::default().with_workflow_dir(Some(dir));
    let registry = WorkflowRegistry::load(&config).unwrap();
    let def = registry.get("inspection-request").unwrap();
    assert_eq!(def.variant.as_deref(), Some("archiving"));
    assert_eq!(def.stages.len(), 4);
}

#[test]
fn test_cli_uses_project_workflow_dir() {
    let tmp = setup();
    write_workflow(
        &tmp.path().join("workflows"),
        "inspection.yaml",
        ARCHIVING_INSPECTION,
    );
    write_project_config(&tmp, "workflow_dir: workflows\n");

    whflow(&tmp)
        .args(["position", "inspection-request", "ARCHIVED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ARCHIVED is in stage 3 (Archived)"));
}

#[test]
fn test_cli_workflow_dir_flag() {
    let tmp = setup();
    write_workflow(
        &tmp.path().join("custom"),
        "inspection.yaml",
        ARCHIVING_INSPECTION,
    );

    whflow(&tmp)
        .args(["--workflow-dir", "custom", "list", "-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inspection-request\tinspection-request\tarchiving\t4\t5"));
}

#[test]
fn test_cli_rejects_invalid_workflow_file() {
    let tmp = setup();
    write_workflow(
        &tmp.path().join("workflows"),
        "broken.yaml",
        "name: broken\nentity_type: import-request\nstages: []\nstatus_order: [PENDING]\n",
    );
    write_project_config(&tmp, "workflow_dir: workflows\n");

    whflow(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn test_cli_default_format_from_config() {
    let tmp = setup();
    write_project_config(&tmp, "default_format: json\n");

    let output = whflow(&tmp).arg("list").output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
}

#[test]
fn test_cli_non_strict_config() {
    let tmp = setup();
    std::fs::write(tmp.path().join("statuses.txt"), "RETURNED\n").unwrap();
    write_project_config(&tmp, "strict: false\n");

    whflow(&tmp)
        .args(["check", "-w", "export-request", "-s", "statuses.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RETURNED"));
}

#[test]
fn test_cli_rejects_unknown_default_format() {
    let tmp = setup();
    write_project_config(&tmp, "default_format: jsn\n");

    whflow(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown default_format"));
}

#[test]
fn test_cli_rejects_terminal_mismatch_in_workflow_dir() {
    let tmp = setup();
    write_workflow(
        &tmp.path().join("workflows"),
        "inspection.yaml",
        &ARCHIVING_INSPECTION.replace("terminal_exceptions: [CANCELLED]", "terminal_exceptions: [INSPECTED]"),
    );
    write_project_config(&tmp, "workflow_dir: workflows\n");

    whflow(&tmp)
        .args(["position", "inspection-request", "CANCELLED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("terminal exception"));
}
