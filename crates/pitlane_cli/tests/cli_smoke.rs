use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_pitlane");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run pitlane --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("race"));
}

#[test]
fn cli_smoke_unknown_command() {
    let exe = env!("CARGO_BIN_EXE_pitlane");
    let output = Command::new(exe)
        .arg("launch")
        .output()
        .expect("failed to run pitlane launch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
