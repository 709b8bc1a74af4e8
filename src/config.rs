//! Configuration loading and path resolution.
//!
//! Supports HOMEHOSTS_HOME env var override for testing.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Paths for the homehosts data directory.
#[derive(Debug, Clone)]
pub struct HomeHostsPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub daemon_json: PathBuf,
    pub daemon_log: PathBuf,
}

impl HomeHostsPaths {
    /// Build paths from base directory (e.g. ~/.homehosts or HOMEHOSTS_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.yaml"),
            daemon_json: base.join("daemon.json"),
            daemon_log: base.join("daemon.log"),
            config_dir: base,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default paths (respects HOMEHOSTS_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOMEHOSTS_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::BaseDirs::new() {
            dirs.home_dir().join(".homehosts")
        } else {
            PathBuf::from(".homehosts")
        };
        Self::from_base(base)
    }
}

/// Main config.yaml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// SSIDs on which the managed block is written.
    #[serde(default)]
    pub ssids: Vec<String>,
    /// Literal hosts lines placed inside the managed block.
    #[serde(default)]
    pub hosts: Vec<String>,
}

/// Written by `homehosts init` when no config exists.
pub const CONFIG_TEMPLATE: &str = "\
# Wireless networks (SSIDs) on which the hosts below are applied.
ssids: []
#  - HomeWiFi

# Lines written verbatim into the hosts file while on one of those networks.
hosts: []
#  - 192.168.1.10 nas.home
";

impl Config {
    /// Load config from a YAML file (with shared lock). A missing or
    /// malformed file is an error.
    pub fn load(path: &Path) -> Result<Config> {
        let read_err = |source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(read_err)?;
        fs2::FileExt::lock_shared(&file).map_err(read_err)?;
        let mut s = String::new();
        file.read_to_string(&mut s).map_err(read_err)?;

        // An empty file deserializes to null, not to a mapping.
        let cfg: Config = if s.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&s).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        };
        if cfg.ssids.is_empty() {
            warn!(path = %path.display(), "no ssids configured; hosts will never be applied by the watcher");
        }
        if cfg.hosts.is_empty() {
            warn!(path = %path.display(), "no hosts lines configured");
        }
        Ok(cfg)
    }

    /// Whether `ssid` is one of the configured home networks.
    pub fn recognizes(&self, ssid: &str) -> bool {
        self.ssids.iter().any(|s| s == ssid)
    }
}
