//! Integration tests for the command-line interface

use super::helpers::{fixtures_dir, pack_dir, run_ansimirror, temp_fixture};

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_ansimirror(&["--help"]);
    let stdout = String::from_utf8(stdout).unwrap();

    assert_eq!(exit_code, 0);
    for command in ["serve", "play", "list", "config"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[test]
fn version_includes_package_version() {
    let (stdout, _stderr, exit_code) = run_ansimirror(&["--version"]);
    assert_eq!(exit_code, 0);
    assert!(String::from_utf8(stdout)
        .unwrap()
        .contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Play
// ============================================================================

#[test]
fn play_quick_writes_transcoded_art() {
    let (_dir, path) = temp_fixture("pack/2019/blocks.ans");
    let (stdout, stderr, exit_code) = run_ansimirror(&["play", "--quick", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        "\x1b[0;1;33m██░▒▓\x1b[0m\r\n╔═╗\r\n"
    );
}

#[test]
fn play_missing_file_fails() {
    let (stdout, stderr, exit_code) = run_ansimirror(&["play", "--quick", "/nonexistent/art.ans"]);

    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Artwork unavailable"));
}

#[test]
fn play_rejects_zero_bitrate() {
    let (_stdout, stderr, exit_code) = run_ansimirror(&["play", "--bitrate", "0", "x.ans"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("--bitrate"));
}

// ============================================================================
// List
// ============================================================================

#[test]
fn list_prints_sorted_names() {
    let root = pack_dir();
    let (stdout, stderr, exit_code) = run_ansimirror(&["list", "--root", root.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(String::from_utf8(stdout).unwrap(), "blocks.ans\nwide.ans\n");
}

#[test]
fn list_missing_root_fails() {
    let (_stdout, stderr, exit_code) = run_ansimirror(&["list", "--root", "/nonexistent/pack"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Artwork directory not found"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_ansimirror(&["config", "show"]);
    let stdout = String::from_utf8(stdout).unwrap();

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("gemini_listen = \"0.0.0.0:1965\""));
    assert!(stdout.contains("bitrate = 9600"));
    assert!(stdout.contains("mode = \"line\""));
}

#[test]
fn config_show_reads_explicit_file() {
    let config = fixtures_dir().join("config.toml");
    let (stdout, stderr, exit_code) =
        run_ansimirror(&["--config", config.to_str().unwrap(), "config", "show"]);
    let stdout = String::from_utf8(stdout).unwrap();

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("hostname = \"ansi.example.org\""));
    assert!(stdout.contains("http_enabled = false"));
    assert!(stdout.contains("mode = \"simulated\""));
}
