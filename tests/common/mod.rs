#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

/// Run the binary against `data_dir` and return (exit code, stdout, stderr).
pub fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_studycoach"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("STUDYCOACH_HOME")
        .env_remove("STUDYCOACH_LOG")
        .output()
        .expect("failed to spawn binary");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Run with `--json` and parse stdout. Panics (with stderr) on failure.
pub fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (code, stdout, stderr) = run_cli(data_dir, &full);
    assert_eq!(code, 0, "studycoach {args:?} failed: {stderr}");
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {args:?}: {e}\n{stdout}"))
}

/// Read the persisted document straight from disk.
pub fn read_state(data_dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join("state.json")).expect("state.json missing");
    serde_json::from_str(&raw).unwrap()
}

/// Run the worked-example assessment (reading 8, grammar 6, writing 3,
/// listening 1).
pub fn assess_example(data_dir: &Path) -> serde_json::Value {
    run_json(
        data_dir,
        &[
            "assess",
            "--reading",
            "8",
            "--grammar",
            "6",
            "--writing",
            "3",
            "--listening",
            "1",
        ],
    )
}
