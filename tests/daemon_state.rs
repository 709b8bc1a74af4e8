//! Daemon state file handling: absent, stale and status output.

mod common;

use assert_cmd::Command;
use homehosts::config::HomeHostsPaths;
use homehosts::watch::daemon::{daemon_status, reload_daemon, stop_daemon};
use predicates::prelude::*;
use std::fs;

#[test]
fn daemon_status_none_when_no_file() {
    let dir = common::temp_home();
    let paths = HomeHostsPaths::for_test(dir.path());
    assert!(daemon_status(&paths).unwrap().is_none());
}

#[test]
fn stale_pid_clears_state() {
    let dir = common::temp_home();
    let paths = HomeHostsPaths::for_test(dir.path());
    // PID that doesn't exist
    fs::write(
        &paths.daemon_json,
        r#"{"pid":99999999,"config_path":"/tmp/config.yaml","interval_secs":300,"started_at":"2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let status = daemon_status(&paths).unwrap();
    assert!(status.is_none(), "stale PID should clear state");
    assert!(!paths.daemon_json.is_file(), "stale state should be cleared");
}

#[test]
fn stop_and_reload_without_daemon() {
    let dir = common::temp_home();
    let paths = HomeHostsPaths::for_test(dir.path());
    stop_daemon(&paths).unwrap();
    assert!(reload_daemon(&paths).is_err());
}

#[test]
fn status_command_reports_not_running() {
    let dir = common::temp_home();
    Command::cargo_bin("homehosts")
        .unwrap()
        .env("HOMEHOSTS_HOME", dir.path())
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daemon not running"));
}

#[test]
fn start_refuses_missing_config() {
    let dir = common::temp_home();
    Command::cargo_bin("homehosts")
        .unwrap()
        .env("HOMEHOSTS_HOME", dir.path())
        .args(["daemon", "start"])
        .assert()
        .failure();
    assert!(!HomeHostsPaths::for_test(dir.path()).daemon_json.exists());
}

#[test]
fn stop_and_reload_clear_stale_state() {
    let dir = common::temp_home();
    let paths = HomeHostsPaths::for_test(dir.path());
    let stale = r#"{"pid":99999999,"config_path":"/tmp/config.yaml","interval_secs":300,"started_at":"2025-01-01T00:00:00Z"}"#;

    fs::write(&paths.daemon_json, stale).unwrap();
    stop_daemon(&paths).unwrap();
    assert!(!paths.daemon_json.is_file());

    fs::write(&paths.daemon_json, stale).unwrap();
    assert!(reload_daemon(&paths).is_err());
    assert!(!paths.daemon_json.is_file());
}

#[test]
fn corrupt_state_file_is_an_error() {
    let dir = common::temp_home();
    let paths = HomeHostsPaths::for_test(dir.path());
    fs::write(&paths.daemon_json, "{not json").unwrap();
    let err = daemon_status(&paths).unwrap_err();
    assert!(format!("{err:#}").contains("parse"), "{err:#}");
}
