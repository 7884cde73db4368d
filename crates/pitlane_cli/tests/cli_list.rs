use std::path::Path;
use std::process::Command;

fn pitlane(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pitlane"));
    command
        .env("PITLANE_STORE_DIR", dir)
        .env("PITLANE_CONFIG_PATH", dir.join("config.json"))
        .env_remove("RUST_LOG");
    command
}

fn seed(dir: &Path) {
    let tasks = serde_json::json!([
        {
            "id": "task-1",
            "name": "watch race",
            "description": "Sofa",
            "date": "2025-06-01",
            "priority": "High",
            "completed": false
        },
        {
            "id": "task-2",
            "name": "Buy cap",
            "description": "Team store",
            "date": "2025-05-01",
            "priority": "Low",
            "completed": true
        },
        {
            "id": "task-3",
            "name": "Book hotel",
            "description": "Near the circuit",
            "date": "2025-05-20",
            "priority": "High",
            "completed": false
        }
    ]);
    std::fs::write(dir.join("fanTasks"), serde_json::to_string(&tasks).unwrap()).unwrap();
}

fn listed_ids(dir: &Path, args: &[&str]) -> Vec<String> {
    let output = pitlane(dir)
        .arg("--json")
        .arg("list")
        .args(args)
        .output()
        .expect("failed to run list command");
    assert!(output.status.success());

    let payload: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    payload["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn list_plain_text_shows_table_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let output = pitlane(dir.path())
        .arg("list")
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("watch race"));
    assert!(stdout.contains("Book hotel"));
    assert!(stdout.contains("Total Plans: 3 | Completed: 1 | Upcoming: 2"));
}

#[test]
fn list_default_keeps_creation_order() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    assert_eq!(listed_ids(dir.path(), &[]), vec!["task-1", "task-2", "task-3"]);
}

#[test]
fn list_filters_by_status_and_priority() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    assert_eq!(
        listed_ids(dir.path(), &["--status", "pending", "--priority", "High"]),
        vec!["task-1", "task-3"]
    );
    assert_eq!(
        listed_ids(dir.path(), &["--status", "completed"]),
        vec!["task-2"]
    );
}

#[test]
fn list_sorts_by_name_and_date() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    assert_eq!(
        listed_ids(dir.path(), &["--sort", "name"]),
        vec!["task-3", "task-2", "task-1"]
    );
    assert_eq!(
        listed_ids(dir.path(), &["--sort", "date"]),
        vec!["task-2", "task-3", "task-1"]
    );
}

#[test]
fn list_explains_when_nothing_matches() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let output = pitlane(dir.path())
        .args(["list", "--status", "completed", "--priority", "High"])
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No plans match the current filters."));
    assert!(stdout.contains("Total Plans: 3"));
}

#[test]
fn list_rejects_unknown_sort() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let output = pitlane(dir.path())
        .args(["list", "--sort", "random"])
        .output()
        .expect("failed to run list command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn list_reports_corrupt_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fanTasks"), "{ nope").unwrap();

    let output = pitlane(dir.path())
        .arg("list")
        .output()
        .expect("failed to run list command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_data"));
}

#[test]
fn summary_command_counts_tasks() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let output = pitlane(dir.path())
        .args(["--json", "summary"])
        .output()
        .expect("failed to run summary command");

    assert!(output.status.success());
    let summary: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["pending"], 2);
}
