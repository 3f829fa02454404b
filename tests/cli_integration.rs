//! Integration tests for the `tb` CLI.
//!
//! Each test runs `tb` as a subprocess with HOME and XDG_CONFIG_HOME pointed
//! at a temp directory, and verifies stdout, stderr or written files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `tb` binary.
fn tb_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tb"))
}

/// Run `tb` with the given args and an isolated home, returning (stdout, stderr, success).
fn run_tb(home: &Path, args: &[&str]) -> (String, String, bool) {
    run_tb_env(home, args, &[])
}

fn run_tb_env(home: &Path, args: &[&str], env: &[(&str, &str)]) -> (String, String, bool) {
    let mut cmd = Command::new(tb_bin());
    cmd.args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("TASKBOARD_LOG");
    for (k, v) in env {
        cmd.env(k, v);
    }
    let output = cmd.output().expect("failed to run tb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tb` expecting success, return stdout.
fn run_tb_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tb(home, args);
    if !success {
        panic!(
            "tb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn test_show_empty_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["show"]);
    assert_eq!(out, "No tasks.\n");
}

#[test]
fn test_show_seeded_tasks_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["-t", "Buy milk", "-t", "  Call Bob  ", "show"]);
    assert_eq!(out, "[ ] Buy milk\n[ ] Call Bob\n");
}

#[test]
fn test_show_json_skips_blank_seeds() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(
        tmp.path(),
        &["show", "--json", "-t", "Buy milk", "-t", "   "],
    );
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["completed"], 0);
    let tasks = parsed["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["description"], "");
    assert!(tasks[0]["subtasks"].as_array().unwrap().is_empty());
    assert!(tasks[0]["id"].is_u64());
}

// ---------------------------------------------------------------------------
// config and logging
// ---------------------------------------------------------------------------

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let (_, stderr, success) = run_tb(tmp.path(), &["-c", missing.to_str().unwrap(), "show"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
    assert!(stderr.contains("nope.toml"));
}

#[test]
fn test_malformed_default_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join(".config/taskboard");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[ui\n").unwrap();

    let (_, stderr, success) = run_tb(tmp.path(), &["show"]);
    assert!(!success);
    assert!(stderr.contains("could not parse config.toml"));
}

#[test]
fn test_valid_config_is_accepted() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("custom.toml");
    fs::write(&path, "[ui]\nshow_key_hints = false\n").unwrap();

    let out = run_tb_ok(tmp.path(), &["--config", path.to_str().unwrap(), "-t", "a", "show"]);
    assert_eq!(out, "[ ] a\n");
}

#[test]
fn test_log_file_receives_debug_events() {
    let tmp = tempfile::TempDir::new().unwrap();
    let log = tmp.path().join("tb.log");
    let (stdout, stderr, success) = run_tb_env(
        tmp.path(),
        &["--log-file", log.to_str().unwrap(), "-t", "Buy milk", "show"],
        &[("TASKBOARD_LOG", "taskboard=debug")],
    );
    assert!(success, "stderr: {}", stderr);
    assert_eq!(stdout, "[ ] Buy milk\n");
    let written = fs::read_to_string(&log).unwrap();
    assert!(written.contains("task added"));
}
