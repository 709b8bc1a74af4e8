//! Doctor command: health checks for config, hosts file and network detection.

use std::path::Path;

use crate::config::Config;
use crate::hosts::RegionStatus;
use crate::platform::{HostsEditor, NetworkProbe};

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Run all doctor checks.
pub fn run_checks(
    config_path: &Path,
    editor: &dyn HostsEditor,
    probe: &dyn NetworkProbe,
) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let hosts_path = editor.path().display().to_string();

    // 1. Config loads
    let config = match Config::load(config_path) {
        Ok(c) => {
            results.push(CheckResult::pass(format!(
                "Config {}: {} ssid(s), {} host line(s)",
                config_path.display(),
                c.ssids.len(),
                c.hosts.len()
            )));
            Some(c)
        }
        Err(e) => {
            results.push(CheckResult::fail(format!(
                "{e}. Run 'homehosts init' to create a template."
            )));
            None
        }
    };

    // 2. Hosts file readable and markers consistent
    match editor.inspect() {
        Ok(RegionStatus::Present) => {
            results.push(CheckResult::pass(format!("{hosts_path}: managed block present")))
        }
        Ok(RegionStatus::Absent) => {
            results.push(CheckResult::pass(format!("{hosts_path}: managed block absent")))
        }
        Ok(RegionStatus::Inconsistent(issue)) => results.push(CheckResult::fail(format!(
            "{hosts_path}: {issue}. Fix the markers by hand; homehosts will not touch the block until then."
        ))),
        Err(e) => results.push(CheckResult::fail(e.to_string())),
    }

    // 3. Hosts file and its directory writable (nothing is modified)
    results.push(match check_writable(editor.path()) {
        Ok(()) => CheckResult::pass(format!("{hosts_path} is writable")),
        Err(e) => CheckResult::fail(format!(
            "{hosts_path} is not writable ({e}). Run homehosts with administrator privileges."
        )),
    });

    // 4. Current network
    match probe.current_network() {
        Ok(ssid) => {
            let home = config.as_ref().is_some_and(|c| c.recognizes(&ssid));
            let kind = if home { "a home network" } else { "not a home network" };
            results.push(CheckResult::pass(format!("Current network '{ssid}' is {kind}")));
        }
        Err(e) => results.push(CheckResult::fail(format!(
            "Cannot detect current network: {e}. Hosts will be restored while this persists."
        ))),
    }

    results
}

fn check_writable(path: &Path) -> std::io::Result<()> {
    std::fs::OpenOptions::new().write(true).open(path)?;
    let target = std::fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    tempfile::tempfile_in(dir)?;
    Ok(())
}
