//! End-to-end CLI tests for slackdump.
//!
//! These tests run the actual binary. Input validation is checked without
//! any network; full runs point `--api-url` at a throwaway local HTTP server
//! that serves canned Slack responses.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Helpers
// ============================================================================

fn slackdump() -> Command {
    let mut cmd = Command::cargo_bin("slackdump").unwrap();
    cmd.env_remove("SLACK_BOT_TOKEN").env_remove("SLACKDUMP_API_URL");
    cmd
}

const AUTH_OK: &str = r#"{"ok": true, "user": "dumpbot", "team": "Acme"}"#;

const HISTORY: &str = r#"{"ok": true, "messages": [
    {"type": "message", "user": "U01", "text": "Deploy finished", "ts": "1705314600.000100"},
    {"type": "message", "user": "U02", "text": "Nice, thanks", "ts": "1705314660.000200",
     "thread_ts": "1705314600.000100"}
], "has_more": false, "response_metadata": {"next_cursor": ""}}"#;

const EMPTY_HISTORY: &str = r#"{"ok": true, "messages": []}"#;

/// Serves `auth.test` and `conversations.history` from canned bodies.
///
/// Returns the base URL to pass as `--api-url`.
fn fake_slack(history: &'static str) -> String {
    serve(history, Duration::ZERO, None)
}

/// Like [`fake_slack`], but holds each history reply for `delay`.
///
/// The receiver yields once per history request, as soon as it arrives.
fn slow_fake_slack(history: &'static str, delay: Duration) -> (String, Receiver<()>) {
    let (tx, rx) = mpsc::channel();
    (serve(history, delay, Some(tx)), rx)
}

fn serve(history: &'static str, delay: Duration, arrived: Option<Sender<()>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers.
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok() && line != "\r\n" && !line.is_empty() {
                line.clear();
            }

            let body = if request_line.contains("/auth.test") {
                AUTH_OK
            } else if request_line.contains("/conversations.history") {
                if let Some(ref tx) = arrived {
                    let _ = tx.send(());
                }
                thread::sleep(delay);
                history
            } else {
                r#"{"ok": false, "error": "unknown_method"}"#
            };

            let _ = write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
        }
    });

    format!("http://{addr}/api")
}

/// Starts an export against `url` without waiting for it.
#[cfg(unix)]
fn spawn_export(url: &str, path: &std::path::Path) -> std::process::Child {
    std::process::Command::new(env!("CARGO_BIN_EXE_slackdump"))
        .env_remove("SLACK_BOT_TOKEN")
        .env_remove("SLACKDUMP_API_URL")
        .args(["--token", "xoxb-1", "--channel", "C042", "--api-url", url])
        .arg("--output")
        .arg(path)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .unwrap()
}

#[cfg(unix)]
fn interrupt(child: &std::process::Child) {
    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help() {
    slackdump()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--channel"))
        .stdout(predicate::str::contains("--start-time"))
        .stdout(predicate::str::contains("--api-url").not());
}

#[test]
fn test_version() {
    slackdump()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Input validation (no network)
// ============================================================================

#[test]
fn test_missing_token() {
    slackdump().args(["--channel", "C123"]).assert().code(2);
}

#[test]
fn test_invalid_token_prefix() {
    slackdump()
        .args(["--token", "xoxp-user", "--channel", "C123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid token format"))
        .stderr(predicate::str::contains("api.slack.com/apps"));
}

#[test]
fn test_token_from_env() {
    slackdump()
        .env("SLACK_BOT_TOKEN", "not-a-bot-token")
        .args(["--channel", "C123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid token format"));
}

#[test]
fn test_invalid_channel() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "G123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Channel IDs should start with 'C'"))
        .stderr(predicate::str::contains("Copy link"));
}

#[test]
fn test_invalid_format() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C123", "--format", "xml"])
        .assert()
        .code(2);
}

#[test]
fn test_zero_limit() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C123", "--limit", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_date() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C123", "--start-time", "15/01/2024"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date format: 15/01/2024"));
}

#[test]
fn test_reversed_time_range() {
    slackdump()
        .args([
            "--token",
            "xoxb-1",
            "--channel",
            "C123",
            "--start-time",
            "2024-02-01",
            "--end-time",
            "2024-01-01",
        ])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_regex() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C123", "--regex", "(unclosed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid regex pattern"));
}

#[test]
fn test_unreachable_api_is_invalid_auth() {
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C123", "--api-url", "http://127.0.0.1:1/api"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid authentication"))
        .stderr(predicate::str::contains("api.slack.com/apps"))
        .stderr(predicate::str::contains("Network Error").not());
}

// ============================================================================
// Full runs against a local fake
// ============================================================================

#[test]
fn test_preview_without_output() {
    let url = fake_slack(HISTORY);
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C042", "--api-url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing first 10 of 2 messages"))
        .stdout(predicate::str::contains("U01: Deploy finished"))
        .stdout(predicate::str::contains("Use --output").not());
}

#[test]
fn test_export_json() {
    let url = fake_slack(HISTORY);
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump").join("general.json");

    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C042", "--api-url", url.as_str()])
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 messages"));

    let parsed: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["channel"], "C042");
    assert_eq!(parsed[1]["thread_ts"], "1705314600.000100");
}

#[test]
fn test_export_csv_with_filter() {
    let url = fake_slack(HISTORY);
    let dir = tempdir().unwrap();
    let path = dir.path().join("general.csv");

    slackdump()
        .args([
            "--token", "xoxb-1", "--channel", "C042", "--api-url", url.as_str(), "--format", "csv",
            "--users", "U02",
        ])
        .arg("-o")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtered 2 → 1 messages"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("datetime,user,text,channel,thread_ts,reply_count"));
    assert!(content.contains("Nice, thanks"));
    assert!(!content.contains("Deploy finished"));
}

#[test]
fn test_empty_channel_exits_zero() {
    let url = fake_slack(EMPTY_HISTORY);
    slackdump()
        .args(["--token", "xoxb-1", "--channel", "C042", "--api-url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages found in channel"));
}

// ============================================================================
// Interrupts
// ============================================================================

#[cfg(unix)]
#[test]
fn test_interrupt_during_last_page_exits_one() {
    let (url, history_requested) = slow_fake_slack(HISTORY, Duration::from_secs(2));
    let dir = tempdir().unwrap();
    let path = dir.path().join("general.json");

    let child = spawn_export(&url, &path);
    history_requested.recv_timeout(Duration::from_secs(10)).unwrap();
    interrupt(&child);

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Operation cancelled by user"));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_second_interrupt_exits_immediately() {
    let (url, history_requested) = slow_fake_slack(HISTORY, Duration::from_secs(20));
    let dir = tempdir().unwrap();
    let path = dir.path().join("general.json");

    let child = spawn_export(&url, &path);
    history_requested.recv_timeout(Duration::from_secs(10)).unwrap();
    let start = Instant::now();
    interrupt(&child);
    thread::sleep(Duration::from_millis(300));
    interrupt(&child);

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Operation cancelled by user"));
    assert!(!path.exists());
}
