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

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().expect("failed to run pitlane");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn activity_shows_placeholder_when_empty() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(pitlane(dir.path()).arg("activity"));
    assert!(stdout.contains("No recent activity."));
}

#[test]
fn activity_lists_newest_first_and_caps_at_ten() {
    let dir = tempfile::tempdir().unwrap();
    for index in 0..12 {
        let name = format!("Plan {index}");
        stdout_of(pitlane(dir.path()).args(["add", &name, "Desc", "2025-05-01"]));
    }

    let stdout = stdout_of(pitlane(dir.path()).args(["--json", "activity"]));
    let entries: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let entries = entries.as_array().unwrap();

    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["message"], "Added: \"Plan 11\" (Medium)");
    assert_eq!(entries[9]["message"], "Added: \"Plan 2\" (Medium)");
}

#[test]
fn theme_defaults_to_disabled() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(pitlane(dir.path()).arg("theme"));
    assert!(stdout.contains("Dark mode: disabled"));
}

#[test]
fn theme_toggle_persists_flag() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(pitlane(dir.path()).args(["theme", "toggle"]));
    assert!(stdout.contains("Dark mode: enabled"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("darkMode")).unwrap(),
        "enabled"
    );

    let stdout = stdout_of(pitlane(dir.path()).args(["theme", "toggle"]));
    assert!(stdout.contains("Dark mode: disabled"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("darkMode")).unwrap(),
        "disabled"
    );
}

#[test]
fn theme_reset_removes_flag() {
    let dir = tempfile::tempdir().unwrap();
    stdout_of(pitlane(dir.path()).args(["theme", "on"]));

    let stdout = stdout_of(pitlane(dir.path()).args(["theme", "reset"]));
    assert!(stdout.contains("Dark mode: disabled"));
    assert!(!dir.path().join("darkMode").exists());
}

#[test]
fn dark_mode_colours_summary_line() {
    let dir = tempfile::tempdir().unwrap();
    stdout_of(pitlane(dir.path()).args(["theme", "on"]));

    let stdout = stdout_of(pitlane(dir.path()).arg("summary"));
    assert!(stdout.contains("\x1b[38;5;208m"));

    let stdout = stdout_of(
        pitlane(dir.path()).args(["--config-override", "palette=solarized", "summary"]),
    );
    assert!(stdout.contains("\x1b[38;5;108m"));
}

#[test]
fn invalid_config_override_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = pitlane(dir.path())
        .args(["--config-override", "colour=red", "summary"])
        .output()
        .expect("failed to run pitlane");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config field"));
}
