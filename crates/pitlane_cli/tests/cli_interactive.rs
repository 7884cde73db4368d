use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_interactive(dir: &Path, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_pitlane");

    let mut child = Command::new(exe)
        .env("PITLANE_STORE_DIR", dir)
        .env("PITLANE_CONFIG_PATH", dir.join("config.json"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn interactive_help_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(dir.path(), "help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn interactive_invalid_command_prints_error_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(dir.path(), "nope\nsummary\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Plans: 0"));
}

#[test]
fn interactive_session_shares_state_between_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(
        dir.path(),
        "add \"Watch qualifying\" \"Set reminder\" 2025-05-10 --priority High\nsummary\nactivity\nquit\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added plan: Watch qualifying"));
    assert!(stdout.contains("Total Plans: 1 | Completed: 0 | Upcoming: 1"));
    assert!(stdout.contains("Added: \"Watch qualifying\" (High)"));
}

#[test]
fn interactive_unknown_id_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(dir.path(), "delete missing\ntheme\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dark mode: disabled"));
}
