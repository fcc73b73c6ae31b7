//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the checked-in fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// The fixture artwork archive.
pub fn pack_dir() -> PathBuf {
    fixtures_dir().join("pack")
}

/// Copy a fixture file into a fresh temp dir and return both.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file_name = Path::new(name).file_name().expect("fixture has a file name");
    let path = dir.path().join(file_name);
    fs::copy(fixtures_dir().join(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

/// Run the ansimirror binary with an isolated config and capture its output.
///
/// Returns raw stdout, stderr as text, and the exit code.
pub fn run_ansimirror(args: &[&str]) -> (Vec<u8>, String, i32) {
    let config_home = TempDir::new().expect("Failed to create temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_ansimirror"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ansimirror");

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);
    (output.stdout, stderr, exit_code)
}
