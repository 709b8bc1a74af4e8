//! Platform abstraction for network detection and the hosts file.

use std::path::{Path, PathBuf};

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

pub mod probe;

use crate::error::{ProbeError, Result};
use crate::hosts::{FileHostsEditor, RegionStatus};

pub use probe::StaticProbe;

/// Trait for reading the identity of the current wireless network.
pub trait NetworkProbe: Send + Sync {
    /// SSID of the network this machine is associated with.
    fn current_network(&self) -> std::result::Result<String, ProbeError>;
}

/// Trait for hosts file operations on the managed block.
pub trait HostsEditor: Send + Sync {
    /// File being edited.
    fn path(&self) -> &Path;
    /// Insert the managed block with these lines. Returns whether the file was written.
    fn insert_region(&self, host_lines: &[String]) -> Result<bool>;
    /// Remove the managed block. Returns whether the file was written.
    fn remove_region(&self) -> Result<bool>;
    /// Report whether the managed block is present.
    fn inspect(&self) -> Result<RegionStatus>;
}

/// System hosts file location.
pub fn hosts_file_path() -> PathBuf {
    if cfg!(windows) {
        let root = std::env::var("SystemRoot").unwrap_or_else(|_| r"C:\Windows".into());
        PathBuf::from(root).join(r"System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Get platform NetworkProbe implementation.
/// If HOMEHOSTS_SSID is set (e.g. in tests), reports that SSID instead.
pub fn default_probe() -> Box<dyn NetworkProbe> {
    if let Ok(ssid) = std::env::var("HOMEHOSTS_SSID") {
        return Box::new(StaticProbe::new(ssid));
    }
    #[cfg(unix)]
    return Box::new(unix::UnixProbe);

    #[cfg(windows)]
    return Box::new(windows::WindowsProbe);
}

/// Get HostsEditor for the system hosts file.
/// If HOMEHOSTS_HOSTS_FILE is set (e.g. in tests), edits that path instead.
pub fn default_hosts_editor() -> Box<dyn HostsEditor> {
    let path = std::env::var_os("HOMEHOSTS_HOSTS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(hosts_file_path);
    Box::new(FileHostsEditor::new(path))
}
