//! Unix (macOS, Linux) platform implementations.

use tracing::debug;

use super::probe::{non_empty, run_command};
use super::NetworkProbe;
use crate::error::ProbeError;

pub struct UnixProbe;

impl NetworkProbe for UnixProbe {
    fn current_network(&self) -> Result<String, ProbeError> {
        #[cfg(target_os = "macos")]
        {
            macos_ssid()
        }

        #[cfg(not(target_os = "macos"))]
        {
            linux_ssid()
        }
    }
}

#[cfg(target_os = "macos")]
fn macos_ssid() -> Result<String, ProbeError> {
    use super::probe::{
        parse_networksetup, parse_ssid_field, parse_sw_vers, parse_system_profiler,
        MacSsidSource,
    };

    let sw_vers = run_command("sw_vers", &[])?;
    let version = parse_sw_vers(&sw_vers)
        .ok_or_else(|| ProbeError::Unsupported("macOS version not found".to_string()))?;
    debug!(?version, "macOS version");

    let source = MacSsidSource::for_version(version).ok_or_else(|| {
        ProbeError::Unsupported(format!(
            "macOS {}.{}.{} is too old",
            version.0, version.1, version.2
        ))
    })?;
    let ssid = match source {
        MacSsidSource::SystemProfiler => {
            parse_system_profiler(&run_command("system_profiler", &["SPAirPortDataType"])?)
        }
        MacSsidSource::Networksetup => parse_networksetup(&run_command(
            "/usr/sbin/networksetup",
            &["-getairportnetwork", "en0"],
        )?),
        MacSsidSource::Wdutil => parse_ssid_field(&run_command("/usr/bin/wdutil", &["info"])?),
        MacSsidSource::Airport => parse_ssid_field(&run_command(
            "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/A/Resources/airport",
            &["--getinfo"],
        )?),
    };
    non_empty(ssid)
}

#[cfg(not(target_os = "macos"))]
fn linux_ssid() -> Result<String, ProbeError> {
    use super::probe::parse_nmcli;

    let nmcli = run_command("nmcli", &["-t", "-f", "active,ssid", "dev", "wifi"])
        .and_then(|out| non_empty(parse_nmcli(&out)));
    match nmcli {
        Ok(ssid) => Ok(ssid),
        Err(first) => {
            debug!(error = %first, "nmcli gave no SSID, trying iwgetid");
            run_command("iwgetid", &["-r"])
                .and_then(|out| non_empty(Some(out.trim().to_string())))
                .map_err(|_| first)
        }
    }
}
