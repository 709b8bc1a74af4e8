//! Windows platform implementations.

use super::probe::{non_empty, parse_ssid_field, run_command};
use super::NetworkProbe;
use crate::error::ProbeError;

pub struct WindowsProbe;

impl NetworkProbe for WindowsProbe {
    fn current_network(&self) -> Result<String, ProbeError> {
        let output = run_command("netsh", &["wlan", "show", "interfaces"])?;
        non_empty(parse_ssid_field(&output))
    }
}
