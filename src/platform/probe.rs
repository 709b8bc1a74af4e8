//! Command runner and output parsers shared by the platform probes.

use std::process::Command;

use tracing::debug;

use super::NetworkProbe;
use crate::error::ProbeError;

/// Probe that always reports the same SSID (HOMEHOSTS_SSID override).
/// An empty SSID reports "not associated".
#[derive(Debug, Clone)]
pub struct StaticProbe {
    ssid: String,
}

impl StaticProbe {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self { ssid: ssid.into() }
    }
}

impl NetworkProbe for StaticProbe {
    fn current_network(&self) -> Result<String, ProbeError> {
        non_empty(Some(self.ssid.trim().to_string()))
    }
}

/// Run a command and return its stdout; non-zero exit is an error.
pub fn run_command(program: &str, args: &[&str]) -> Result<String, ProbeError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(%command, "running network probe");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ProbeError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Empty or missing SSID means the machine is not on a wireless network.
pub fn non_empty(ssid: Option<String>) -> Result<String, ProbeError> {
    match ssid {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ProbeError::NotAssociated),
    }
}

/// macOS release as reported by `sw_vers`, compared numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MacVersion(pub u32, pub u32, pub u32);

impl MacVersion {
    /// Parse "14.5" or "13.6.9"; missing components are zero.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('.').map(|p| p.parse::<u32>());
        let major = parts.next()?.ok()?;
        let minor = parts.next().transpose().ok()?.unwrap_or(0);
        let patch = parts.next().transpose().ok()?.unwrap_or(0);
        Some(Self(major, minor, patch))
    }

    pub fn at_least(&self, other: MacVersion) -> bool {
        *self >= other
    }
}

/// `ProductVersion:` value from `sw_vers` output.
pub fn parse_sw_vers(output: &str) -> Option<MacVersion> {
    output
        .lines()
        .find_map(|l| l.trim().strip_prefix("ProductVersion:"))
        .and_then(MacVersion::parse)
}

/// Which macOS tool can report the SSID on a given release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacSsidSource {
    SystemProfiler,
    Networksetup,
    Wdutil,
    Airport,
}

impl MacSsidSource {
    pub fn for_version(version: MacVersion) -> Option<Self> {
        if version.at_least(MacVersion(15, 0, 0)) {
            Some(Self::SystemProfiler)
        } else if version.at_least(MacVersion(14, 5, 0)) {
            Some(Self::Networksetup)
        } else if version.at_least(MacVersion(14, 4, 0)) {
            Some(Self::Wdutil)
        } else if version.at_least(MacVersion(13, 6, 9)) {
            Some(Self::Airport)
        } else {
            None
        }
    }
}

/// Line following "Current Network Information:" in
/// `system_profiler SPAirPortDataType`, e.g. "            HomeWiFi:".
pub fn parse_system_profiler(output: &str) -> Option<String> {
    let mut lines = output.lines();
    lines.find(|l| l.contains("Current Network Information:"))?;
    let name = lines.next()?.trim();
    Some(name.strip_suffix(':').unwrap_or(name).to_string())
}

/// `networksetup -getairportnetwork en0`: "Current Wi-Fi Network: HomeWiFi".
pub fn parse_networksetup(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|l| l.split_once(": "))
        .map(|(_, ssid)| ssid.trim().to_string())
}

/// `SSID : value` style lines (wdutil, airport, netsh). Keys such as `BSSID`
/// do not match.
pub fn parse_ssid_field(output: &str) -> Option<String> {
    output.lines().find_map(|l| {
        let (key, value) = l.split_once(':')?;
        (key.trim() == "SSID").then(|| value.trim().to_string())
    })
}

/// `nmcli -t -f active,ssid dev wifi`: the `yes:` line; terse mode escapes
/// colons in the SSID as `\:`.
pub fn parse_nmcli(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|l| l.strip_prefix("yes:"))
        .map(|ssid| ssid.replace("\\:", ":"))
}
