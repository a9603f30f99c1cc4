//! CLI E2E tests.
//!
//! Tests run the built binary with a scripted stdin and an isolated config
//! file, then inspect stdout.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run the binary with `args`, feed `script` on stdin, return
/// (stdout, stderr, exit code).
fn run_cli(config: &Path, args: &[&str], script: impl AsRef<[u8]>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focusloop"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn focusloop");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_ref())
        .expect("Failed to write script");

    let output = child.wait_with_output().expect("Failed to wait for focusloop");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn quiet_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        "[notifications]\nenabled = false\n\n[log]\nlevel = \"warn\"\n",
    )
    .unwrap();
    path
}

/// Pull the pretty-printed JSON object that `status` prints out of mixed
/// stdout.
fn last_status(stdout: &str) -> serde_json::Value {
    let start = stdout.rfind("{\n").expect("status output");
    let end = stdout[start..].find("\n}").expect("end of status output") + start + 2;
    serde_json::from_str(&stdout[start..end]).expect("status is JSON")
}

#[test]
fn intention_starts_focus() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(&config, &[], "intention write paper\nstatus\nquit\n");
    assert_eq!(code, 0);

    let status = last_status(&stdout);
    assert_eq!(status["phase"], "focus");
    assert_eq!(status["is_running"], true);
    assert_eq!(status["intention"], "write paper");
    assert!(stdout.contains("Focus · running · write paper"));
}

#[test]
fn intention_keeps_inner_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(&config, &[], "intention   write   the\tpaper  \nstatus\n");
    assert_eq!(code, 0);
    assert_eq!(last_status(&stdout)["intention"], "write   the\tpaper");
}

#[test]
fn unreadable_line_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let mut script = b"\xff\xfe start\n".to_vec();
    script.extend_from_slice(b"intention x\nstatus\nquit\n");
    let (stdout, _, code) = run_cli(&config, &[], script);
    assert_eq!(code, 0);

    let status = last_status(&stdout);
    assert_eq!(status["intention"], "x");
    assert_eq!(status["is_running"], true);
}

#[test]
fn blank_intention_reprompts() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(&config, &[], "intention   \nstart\nstatus\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Set an intention first"));

    let status = last_status(&stdout);
    assert_eq!(status["is_running"], false);
    assert_eq!(status["intention"], "");
}

#[test]
fn intention_flag_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(
        &config,
        &["--intention", "review"],
        "skip\npause\nstatus\nreset\nstatus\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("[05:00] Break · running · review"));

    let status = last_status(&stdout);
    assert_eq!(status["phase"], "focus");
    assert_eq!(status["remaining_seconds"], 1500);
    assert_eq!(status["intention"], "");
}

#[test]
fn json_mode_renders_views() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(&config, &["--json"], "intention x\nquit\n");
    assert_eq!(code, 0);

    let views: Vec<serde_json::Value> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    assert!(!views.is_empty());
    let running = views
        .iter()
        .find(|v| v["is_running"] == true)
        .expect("a running view");
    assert_eq!(running["formatted_time"], "25:00");
    assert_eq!(running["start_label"], "Pause");
    assert_eq!(running["controls"]["start"], true);
    // Quitting pauses the engine.
    assert_eq!(views.last().unwrap()["is_running"], false);
}

#[test]
fn unknown_command_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = quiet_config(dir.path());
    let (stdout, _, code) = run_cli(&config, &[], "explode\nquit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("explode"));
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (stdout, _, code) = run_cli(&config, &["config", "set", "speech.enabled", "true"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&config, &["config", "get", "speech.enabled"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (_, stderr, code) = run_cli(&config, &["config", "get", "nope"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}
