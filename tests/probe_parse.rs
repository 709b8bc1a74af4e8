//! Parsing of platform SSID command output.

use homehosts::error::ProbeError;
use homehosts::platform::probe::{
    non_empty, parse_networksetup, parse_nmcli, parse_ssid_field, parse_sw_vers,
    parse_system_profiler, MacSsidSource, MacVersion,
};
use homehosts::platform::{NetworkProbe, StaticProbe};

#[test]
fn sw_vers_version() {
    let out = "ProductName:\t\tmacOS\nProductVersion:\t\t14.4.1\nBuildVersion:\t\t23E224\n";
    assert_eq!(parse_sw_vers(out), Some(MacVersion(14, 4, 1)));
    assert_eq!(MacVersion::parse("15"), Some(MacVersion(15, 0, 0)));
    assert_eq!(MacVersion::parse("x.1"), None);
    assert_eq!(parse_sw_vers("ProductName: macOS\n"), None);
}

#[test]
fn macos_tool_by_version() {
    use MacSsidSource::*;
    assert_eq!(MacSsidSource::for_version(MacVersion(15, 1, 0)), Some(SystemProfiler));
    assert_eq!(MacSsidSource::for_version(MacVersion(14, 5, 0)), Some(Networksetup));
    assert_eq!(MacSsidSource::for_version(MacVersion(14, 4, 1)), Some(Wdutil));
    assert_eq!(MacSsidSource::for_version(MacVersion(14, 0, 0)), Some(Airport));
    assert_eq!(MacSsidSource::for_version(MacVersion(13, 6, 9)), Some(Airport));
    assert_eq!(MacSsidSource::for_version(MacVersion(13, 6, 8)), None);
}

#[test]
fn system_profiler_current_network() {
    let out = "Wi-Fi:\n\n      Interfaces:\n        en0:\n          Status: Connected\n          Current Network Information:\n            Home WiFi:\n              PHY Mode: 802.11ax\n";
    assert_eq!(parse_system_profiler(out), Some("Home WiFi".to_string()));
    assert_eq!(parse_system_profiler("Wi-Fi:\n  Status: Off\n"), None);
}

#[test]
fn networksetup_output() {
    assert_eq!(
        parse_networksetup("Current Wi-Fi Network: HomeWiFi\n"),
        Some("HomeWiFi".to_string())
    );
    assert_eq!(
        parse_networksetup("You are not associated with an AirPort network.\n"),
        None
    );
}

#[test]
fn ssid_field_skips_bssid() {
    let netsh = "    Name                   : Wi-Fi\n    State                  : connected\n    SSID                   : Home WiFi\n    BSSID                  : aa:bb:cc:dd:ee:ff\n";
    assert_eq!(parse_ssid_field(netsh), Some("Home WiFi".to_string()));

    let airport = "     agrCtlRSSI: -50\n          BSSID: aa:bb:cc:dd:ee:ff\n           SSID: HomeWiFi\n";
    assert_eq!(parse_ssid_field(airport), Some("HomeWiFi".to_string()));

    assert_eq!(parse_ssid_field("    BSSID : aa:bb\n"), None);
}

#[test]
fn nmcli_active_line() {
    let out = "no:Neighbour\nyes:Home\\:Net\nno:Other\n";
    assert_eq!(parse_nmcli(out), Some("Home:Net".to_string()));
    assert_eq!(parse_nmcli("no:Neighbour\n"), None);
}

#[test]
fn empty_ssid_is_not_associated() {
    assert!(matches!(non_empty(Some(String::new())), Err(ProbeError::NotAssociated)));
    assert!(matches!(non_empty(None), Err(ProbeError::NotAssociated)));
    assert_eq!(non_empty(Some("x".into())).unwrap(), "x");
}

#[test]
fn static_probe() {
    assert_eq!(StaticProbe::new(" HomeWiFi\n").current_network().unwrap(), "HomeWiFi");
    assert!(matches!(
        StaticProbe::new("").current_network(),
        Err(ProbeError::NotAssociated)
    ));
}
