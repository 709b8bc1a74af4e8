//! End to end: apply, restore and once against a temp hosts file.

mod common;

use assert_cmd::Command;
use homehosts::region::{MANAGED_END, MANAGED_START};
use predicates::prelude::*;
use std::path::Path;

const ORIGINAL: &str = "127.0.0.1\tlocalhost\n";

fn homehosts(home: &Path, hosts: &Path) -> Command {
    let mut cmd = Command::cargo_bin("homehosts").unwrap();
    cmd.env("HOMEHOSTS_HOME", home)
        .env("HOMEHOSTS_HOSTS_FILE", hosts)
        .env_remove("HOMEHOSTS_SSID");
    cmd
}

#[test]
fn apply_then_restore() {
    let dir = common::temp_home();
    common::write_config(dir.path(), &["HomeWiFi"], &["10.0.0.5 nas.home"]);
    let hosts = common::write_hosts(dir.path(), ORIGINAL);

    homehosts(dir.path(), &hosts)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hosts applied"));
    let content = std::fs::read_to_string(&hosts).unwrap();
    assert!(content.contains(MANAGED_START));
    assert!(content.contains("10.0.0.5 nas.home"));
    assert!(content.contains(MANAGED_END));

    homehosts(dir.path(), &hosts)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hosts unchanged"));

    homehosts(dir.path(), &hosts)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hosts restored"));
    assert_eq!(std::fs::read_to_string(&hosts).unwrap(), ORIGINAL);
}

#[test]
fn once_follows_network() {
    let dir = common::temp_home();
    common::write_config(dir.path(), &["HomeWiFi"], &["10.0.0.5 nas.home"]);
    let hosts = common::write_hosts(dir.path(), ORIGINAL);

    homehosts(dir.path(), &hosts)
        .env("HOMEHOSTS_SSID", "HomeWiFi")
        .arg("once")
        .assert()
        .success()
        .stdout(predicate::str::contains("Network HomeWiFi: hosts applied"));
    assert!(std::fs::read_to_string(&hosts).unwrap().contains("10.0.0.5 nas.home"));

    homehosts(dir.path(), &hosts)
        .env("HOMEHOSTS_SSID", "Cafe")
        .arg("once")
        .assert()
        .success()
        .stdout(predicate::str::contains("Network Cafe: hosts restored"));
    assert_eq!(std::fs::read_to_string(&hosts).unwrap(), ORIGINAL);
}

#[test]
fn explicit_config_flag() {
    let dir = common::temp_home();
    let config_dir = dir.path().join("elsewhere");
    std::fs::create_dir(&config_dir).unwrap();
    let config = common::write_config(&config_dir, &["HomeWiFi"], &["10.0.0.5 nas.home"]);
    let hosts = common::write_hosts(dir.path(), ORIGINAL);

    homehosts(dir.path(), &hosts)
        .arg("-c")
        .arg(&config)
        .arg("apply")
        .assert()
        .success();
    assert!(std::fs::read_to_string(&hosts).unwrap().contains("10.0.0.5 nas.home"));
}

#[test]
fn missing_config_fails_before_touching_hosts() {
    let dir = common::temp_home();
    let hosts = common::write_hosts(dir.path(), ORIGINAL);

    homehosts(dir.path(), &hosts)
        .env("HOMEHOSTS_SSID", "HomeWiFi")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config"));
    assert_eq!(std::fs::read_to_string(&hosts).unwrap(), ORIGINAL);
}

#[test]
fn missing_hosts_file_fails_apply() {
    let dir = common::temp_home();
    common::write_config(dir.path(), &["HomeWiFi"], &["10.0.0.5 nas.home"]);

    homehosts(dir.path(), &dir.path().join("hosts"))
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
