use std::path::Path;
use std::process::Command;

// Nothing listens on the discard port, so connections are refused at once.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/ergast/f1/current.json";

fn pitlane(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pitlane"));
    command
        .env("PITLANE_STORE_DIR", dir)
        .env("PITLANE_CONFIG_PATH", dir.join("config.json"))
        .env_remove("RUST_LOG");
    command
}

#[test]
fn race_reports_unavailable_when_every_endpoint_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = pitlane(dir.path())
        .args([
            "--config-override",
            "timeout=1",
            "race",
            "--endpoint",
            DEAD_ENDPOINT,
            "--endpoint",
            DEAD_ENDPOINT,
        ])
        .output()
        .expect("failed to run race command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unable to load race data"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("ERROR"));
}

#[test]
fn race_json_reports_unavailable_status() {
    let dir = tempfile::tempdir().unwrap();
    let output = pitlane(dir.path())
        .args([
            "--json",
            "--config-override",
            &format!("race.endpoints={DEAD_ENDPOINT}"),
            "race",
        ])
        .output()
        .expect("failed to run race command");

    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(payload["status"], "unavailable");
}
