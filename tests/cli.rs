//! Exit codes of the hikr-dl binary
//!
//! None of these runs reach the network: they fail on arguments or
//! directories, or request zero photos.

use std::process::Command;
use tempfile::TempDir;

fn hikr_dl(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hikr-dl"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_count_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let status = hikr_dl(&dir).status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn non_numeric_count_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let status = hikr_dl(&dir).arg("lots").status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn missing_directories_fail_before_downloading() {
    let dir = TempDir::new().unwrap();
    let output = hikr_dl(&dir).arg("3").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        format!("{}{}", stdout, stderr).contains("does not exist"),
        "stdout: {}\nstderr: {}",
        stdout,
        stderr
    );
}

#[test]
fn zero_photos_succeeds() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("img")).unwrap();
    std::fs::create_dir(dir.path().join("html")).unwrap();

    let output = hikr_dl(&dir).arg("0").output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "0 requested, 0 saved, 0 skipped"
    );
}

#[test]
fn bad_config_file_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("hikr.json");
    std::fs::write(&config, r#"{ "id_span": 0 }"#).unwrap();

    let status = hikr_dl(&dir)
        .args(["1", "--config"])
        .arg(&config)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
}
