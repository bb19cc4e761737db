//! Integration tests for the taskgraph CLI
//!
//! Each test works on a tasks file in a fresh temporary directory and runs
//! the real binary against it.

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a taskgraph command running in `dir`
fn taskgraph(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("taskgraph"));
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Helper to write a tasks file and return its directory
fn project(tasks: &Value) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tasks.json"), serde_json::to_string_pretty(tasks).unwrap()).unwrap();
    dir
}

fn read_tasks(dir: &TempDir) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join("tasks.json")).unwrap()).unwrap()
}

fn chain() -> Value {
    json!([
        { "id": 1, "title": "Design schema" },
        { "id": 2, "title": "Write migrations", "dependencies": [1] },
        { "id": 3, "title": "Seed data", "dependencies": [2] }
    ])
}

fn broken() -> Value {
    json!({
        "metadata": { "project": "demo" },
        "tasks": [
            { "id": 1, "title": "A", "dependencies": [2] },
            { "id": 2, "title": "B", "dependencies": [1] },
            { "id": 5, "title": "C", "dependencies": [5] },
            { "id": 7, "title": "D", "dependencies": [99] }
        ]
    })
}

// =============================================================================
// BASIC TESTS
// =============================================================================

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    taskgraph(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskgraph v"));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    taskgraph(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("next"));
}

#[test]
fn test_parse_id() {
    let dir = TempDir::new().unwrap();
    let output = taskgraph(dir.path()).args(["--json", "parse-id", "12.3"]).output().unwrap();
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["taskId"], 12);
    assert_eq!(parsed["subtaskId"], 3);
    assert_eq!(parsed["formatted"], "12.3");
}

#[test]
fn test_parse_id_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    taskgraph(dir.path())
        .args(["parse-id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid task id format"));
}

// =============================================================================
// VALIDATE / FIX TESTS
// =============================================================================

#[test]
fn test_validate_clean() {
    let dir = project(&chain());
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency issues found"));
}

#[test]
fn test_validate_reports_problems_and_fails() {
    let dir = project(&broken());
    let output = taskgraph(dir.path())
        .args(["--file", "tasks.json", "--json", "validate"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["report"]["selfReferences"], json!([5]));
    assert_eq!(result["report"]["missingReferences"], json!([{ "taskId": 7, "dependencyId": 99 }]));
    assert_eq!(result["report"]["cycles"].as_array().unwrap().len(), 1);
}

#[test]
fn test_fix_dry_run_writes_nothing() {
    let dir = project(&broken());
    let before = read_tasks(&dir);

    taskgraph(dir.path())
        .args(["--file", "tasks.json", "fix", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would remove 3 dependency edge(s)"));

    assert_eq!(read_tasks(&dir), before);
}

#[test]
fn test_fix_repairs_and_keeps_envelope() {
    let dir = project(&broken());

    taskgraph(dir.path())
        .args(["--file", "tasks.json", "fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 dependency edge(s)"));

    let saved = read_tasks(&dir);
    assert_eq!(saved["metadata"]["project"], "demo");
    assert_eq!(saved["tasks"][2]["dependencies"], json!([]));
    assert_eq!(saved["tasks"][3]["dependencies"], json!([]));

    taskgraph(dir.path()).args(["--file", "tasks.json", "validate"]).assert().success();
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to fix"));
}

// =============================================================================
// NEXT TESTS
// =============================================================================

#[test]
fn test_next_recommends_unblocked_task() {
    let dir = project(&chain());
    let output = taskgraph(dir.path())
        .args(["--file", "tasks.json", "--json", "next"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["recommendation"]["taskId"], 1);
    assert_eq!(result["blockedTasks"][0]["taskId"], 2);
    assert_eq!(result["blockedTasks"][0]["blockedBy"], json!([1]));
    assert_eq!(result["blockedTasks"][1]["blockedBy"], json!([2]));
}

#[test]
fn test_next_with_exclude() {
    let dir = project(&json!([
        { "id": 1, "title": "One", "priority": "high" },
        { "id": 2, "title": "Two" }
    ]));

    taskgraph(dir.path())
        .args(["--file", "tasks.json", "next", "--exclude", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2]"));
}

#[test]
fn test_next_uses_complexity_report() {
    let dir = project(&json!([
        { "id": 1, "title": "Hard" },
        { "id": 2, "title": "Easy" }
    ]));
    fs::create_dir_all(dir.path().join(".taskgraph")).unwrap();
    fs::write(
        dir.path().join(".taskgraph/task-complexity-report.json"),
        json!({ "complexityAnalysis": [
            { "taskId": 1, "complexityScore": 9 },
            { "taskId": 2, "complexityScore": 2 }
        ] })
        .to_string(),
    )
    .unwrap();

    let output = taskgraph(dir.path())
        .args([
            "--file",
            "tasks.json",
            "--json",
            "next",
            "--priority-weight",
            "0",
            "--dependency-weight",
            "0",
            "--complexity-weight",
            "1",
        ])
        .output()
        .unwrap();

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["recommendation"]["taskId"], 2);

    // the score is never written back
    assert!(read_tasks(&dir)[1].get("complexityScore").is_none());
}

#[test]
fn test_next_all_done() {
    let dir = project(&json!([{ "id": 1, "title": "Done", "status": "done" }]));
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No task is ready to start"));
}

// =============================================================================
// TASK MANAGEMENT TESTS
// =============================================================================

#[test]
fn test_missing_file_lists_nothing() {
    let dir = TempDir::new().unwrap();
    taskgraph(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found"));
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();

    taskgraph(dir.path())
        .args(["add", "First", "-p", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1: First"));
    taskgraph(dir.path())
        .args(["add", "Second", "--depends-on", "1"])
        .assert()
        .success();
    taskgraph(dir.path())
        .args(["add", "Step", "--parent", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2.1: Step"));

    assert!(dir.path().join(".taskgraph/tasks.json").exists());

    taskgraph(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] First"))
        .stdout(predicate::str::contains("[2] Second"))
        .stdout(predicate::str::contains("0/1 subtasks"));
}

#[test]
fn test_set_status_and_filter() {
    let dir = project(&chain());

    taskgraph(dir.path())
        .args(["--file", "tasks.json", "set-status", "1", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1: pending -> done"));

    let output = taskgraph(dir.path())
        .args(["--file", "tasks.json", "--json", "list", "--status", "done"])
        .output()
        .unwrap();
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(result["tasks"][0]["id"], 1);
}

#[test]
fn test_set_status_rejects_unknown_status() {
    let dir = project(&chain());
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "set-status", "1", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn test_show_filters_subtasks() {
    let dir = project(&json!([{
        "id": 4,
        "title": "Parent",
        "subtasks": [
            { "id": 1, "title": "Finished", "status": "done" },
            { "id": 2, "title": "Open" }
        ]
    }]));

    let output = taskgraph(dir.path())
        .args(["--file", "tasks.json", "--json", "show", "4", "--status", "pending"])
        .output()
        .unwrap();
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["originalSubtaskCount"], 2);
    assert_eq!(result["task"]["subtasks"].as_array().unwrap().len(), 1);
    assert_eq!(result["task"]["subtasks"][0]["title"], "Open");
}

#[test]
fn test_remove_strips_references() {
    let dir = project(&chain());

    taskgraph(dir.path())
        .args(["--file", "tasks.json", "remove", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2"));

    let saved = read_tasks(&dir);
    assert_eq!(saved.as_array().unwrap().len(), 2);
    assert_eq!(saved[1]["id"], 3);
    assert_eq!(saved[1]["dependencies"], json!([]));
}

#[test]
fn test_depend_rejects_cycle() {
    let dir = project(&chain());
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "depend", "1", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would create a cycle"));
}

#[test]
fn test_malformed_file_fails() {
    let dir = project(&json!({ "tasks": "nope" }));
    taskgraph(dir.path())
        .args(["--file", "tasks.json", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an array"));
}
