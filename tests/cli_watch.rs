//! E2E tests for the `layout-preview` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_layout-preview"))
}

/// Run in `dir` with no config or PREVIEW_* variables leaking in
fn isolated(dir: &Path) -> Command {
    let mut cmd = bin();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1");
    for var in [
        "PREVIEW_GDS_FILE",
        "PREVIEW_REFRESH_MS",
        "PREVIEW_STABLE_SAMPLES",
        "PREVIEW_SHOW_ALL",
        "PREVIEW_ZOOM_FIT",
        "PREVIEW_READY_FILE",
        "PREVIEW_INITIAL_TIMEOUT_MS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad json {l:?}: {e}")))
        .collect()
}

fn event_names(output: &Output) -> Vec<String> {
    json_lines(output)
        .iter()
        .filter_map(|v| v["event"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn test_help_lists_commands() {
    let output = bin().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["watch", "signature", "wait-ready"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn test_signature_json_reports_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chip.gds");
    fs::write(&path, b"0123456789").unwrap();

    let output = isolated(dir.path())
        .args(["--json", "signature"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "signature");
    assert_eq!(lines[0]["signature"]["size"], 10);
}

#[test]
fn test_signature_json_missing_file_is_null() {
    let dir = tempdir().unwrap();

    let output = isolated(dir.path())
        .args(["--json", "signature", "absent.gds"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(json_lines(&output)[0]["signature"].is_null());
}

#[test]
fn test_wait_ready_times_out() {
    let dir = tempdir().unwrap();

    let started = Instant::now();
    let output = isolated(dir.path())
        .args(["wait-ready", "never.ready", "--timeout-ms", "60"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(started.elapsed() < Duration::from_secs(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timed out"), "stderr: {stderr}");
}

#[test]
fn test_wait_ready_sees_existing_marker() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("preview.ready"), "ready\n").unwrap();

    let output = isolated(dir.path())
        .args(["--json", "wait-ready", "preview.ready"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(json_lines(&output)[0]["event"], "ready");
}

#[test]
fn test_watch_without_path_fails() {
    let dir = tempdir().unwrap();

    let output = isolated(dir.path()).arg("watch").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PREVIEW_GDS_FILE"), "stderr: {stderr}");
}

#[test]
fn test_watch_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("layout-preview.toml"), "[watch]\nstable_samples_required = \"two\"\n")
        .unwrap();

    let output = isolated(dir.path())
        .args(["watch", "chip.gds"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_watch_exits_when_viewer_closes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("chip.gds"), b"layout").unwrap();

    let output = isolated(dir.path())
        .args([
            "--json",
            "watch",
            "chip.gds",
            "--ready-file",
            "out/preview.ready",
            "--viewer",
            "true",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let events = event_names(&output);
    assert_eq!(events.first().map(String::as_str), Some("watch_started"));
    assert!(events.contains(&"loaded".to_string()));
    assert!(events.contains(&"ready".to_string()));
    assert_eq!(events.last().map(String::as_str), Some("viewer_closed"));
    assert_eq!(
        fs::read_to_string(dir.path().join("out/preview.ready")).unwrap(),
        "ready\n"
    );
}

#[cfg(unix)]
#[test]
fn test_watch_reopens_viewer_after_settled_change() {
    let dir = tempdir().unwrap();
    let layout = dir.path().join("chip.gds");
    let ready = dir.path().join("preview.ready");
    fs::write(&layout, b"first").unwrap();

    let child = isolated(dir.path())
        .args(["--json", "watch", "chip.gds", "--ready-file"])
        .arg(&ready)
        .args(["--viewer", "sleep", "1"])
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !ready.exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(ready.exists(), "watcher never signalled ready");
    fs::write(&layout, b"second, and longer").unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output);
    let reloaded: Vec<_> = lines.iter().filter(|v| v["event"] == "reloaded").collect();
    assert_eq!(reloaded.len(), 1, "events: {lines:?}");
    assert_eq!(reloaded[0]["mode"], "reopen");
    assert_eq!(reloaded[0]["session"], 1);
    assert!(lines.iter().any(|v| v["event"] == "soft_reload_failed"));
}
