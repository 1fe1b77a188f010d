//! End-to-end tests for the `wl` binary.
//!
//! Each test writes a config pointing every path into a temp directory, so
//! nothing touches the real data or state directories.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn wl_binary() -> String {
    env!("CARGO_BIN_EXE_wl").to_string()
}

/// A temp directory with a config defining `work` (interval) and `todo` (discrete).
struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        let root = dir.path().display();
        std::fs::write(
            &config,
            format!(
                r#"default_log = "work"
state_dir = '{root}/state'

[logs.work]
path = '{root}/logs/work.txt'
mode = "interval"

[logs.todo]
path = '{root}/logs/todo.txt'
mode = "discrete"
"#
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(wl_binary())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to run wl")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "wl {args:?} should succeed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_clock_in_and_out_writes_log() {
    let fx = Fixture::new();

    let stdout = fx.run_ok(&["in"]);
    assert!(stdout.starts_with("clocked in at "), "got: {stdout}");
    assert!(fx.path("state/cursors/work.json").exists());

    let stdout = fx.run_ok(&["out", "first", "task"]);
    assert!(stdout.starts_with("clocked out at "), "got: {stdout}");
    assert!(stdout.contains("hours today."));
    assert!(!fx.path("state/cursors/work.json").exists());

    let log = read(&fx.path("logs/work.txt"));
    assert!(log.contains(") first task\n"), "log: {log}");
    assert!(log.contains("\nTotal: "), "log: {log}");
}

#[test]
fn test_clock_out_without_clock_in_fails() {
    let fx = Fixture::new();

    let output = fx.run(&["out", "nothing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no open clock-in"), "stderr: {stderr}");
}

#[test]
fn test_missing_note_without_terminal_fails() {
    let fx = Fixture::new();
    fx.run_ok(&["in"]);

    let output = fx.run(&["out"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a note is required"), "stderr: {stderr}");

    // The clock-in is still pending.
    assert!(fx.path("state/cursors/work.json").exists());
}

#[test]
fn test_discrete_events_and_purge() {
    let fx = Fixture::new();

    fx.run_ok(&["--log", "todo", "event", "write", "docs"]);
    fx.run_ok(&["--log", "todo", "mark", "ship", "it", "X"]);

    let log = read(&fx.path("logs/todo.txt"));
    assert!(log.contains(" - ) write docs\n"), "log: {log}");
    assert!(log.contains(" - ) ship it X\n"), "log: {log}");
    assert!(!log.contains("Total"));

    let stdout = fx.run_ok(&["--log", "todo", "purge"]);
    assert_eq!(stdout, "Removed 1 completed entry from 'todo'.\n");

    let log = read(&fx.path("logs/todo.txt"));
    assert!(log.contains(" - ) write docs\n"));
    assert!(!log.contains("ship it X"));
}

#[test]
fn test_status_json_does_not_write() {
    let fx = Fixture::new();
    let log_path = fx.path("logs/work.txt");
    std::fs::create_dir_all(log_path.parent().unwrap()).unwrap();
    std::fs::write(&log_path, "Mon 01/06/2025\n09:00 - 12:00) design\n").unwrap();

    let stdout = fx.run_ok(&["status", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["log"], "work");
    assert_eq!(value["clocked_in"], false);

    assert_eq!(read(&log_path), "Mon 01/06/2025\n09:00 - 12:00) design\n");
}

#[test]
fn test_refresh_normalizes_file() {
    let fx = Fixture::new();
    let log_path = fx.path("logs/work.txt");
    std::fs::create_dir_all(log_path.parent().unwrap()).unwrap();
    std::fs::write(&log_path, "Mon 01/06/2025\n09:00 - 12:00) design\n").unwrap();

    fx.run_ok(&["refresh"]);
    assert_eq!(
        read(&log_path),
        "Mon 01/06/2025\n09:00 - 12:00) design\nTotal: 3.0 hours\nTotal Week Hours: 3.0 hours\n\n\n"
    );
}

#[test]
fn test_malformed_log_is_reported() {
    let fx = Fixture::new();
    let log_path = fx.path("logs/work.txt");
    std::fs::create_dir_all(log_path.parent().unwrap()).unwrap();
    std::fs::write(&log_path, "not a header\n").unwrap();

    let output = fx.run(&["refresh"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed log file"), "stderr: {stderr}");
    assert_eq!(read(&log_path), "not a header\n");
}

#[test]
fn test_unknown_log_lists_configured_names() {
    let fx = Fixture::new();

    let output = fx.run(&["--log", "journal", "status"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown log 'journal'"), "stderr: {stderr}");
    assert!(stderr.contains("todo"), "stderr: {stderr}");
}

#[test]
fn test_logs_lists_default_marker() {
    let fx = Fixture::new();

    let stdout = fx.run_ok(&["logs"]);
    assert!(stdout.contains("  todo (discrete) "), "got: {stdout}");
    assert!(stdout.contains("* work (interval) "), "got: {stdout}");
}
