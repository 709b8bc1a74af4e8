//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory for use as HOMEHOSTS_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("homehosts_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Write a hosts file into `dir` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a config.yaml into `dir` and return its path.
pub fn write_config(dir: &Path, ssids: &[&str], hosts: &[&str]) -> PathBuf {
    let path = dir.join("config.yaml");
    let mut s = String::from("ssids:\n");
    for ssid in ssids {
        s.push_str(&format!("  - \"{ssid}\"\n"));
    }
    s.push_str("hosts:\n");
    for line in hosts {
        s.push_str(&format!("  - \"{line}\"\n"));
    }
    std::fs::write(&path, s).unwrap();
    path
}

pub fn lines(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}
