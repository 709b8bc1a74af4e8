//! Background watcher: a detached `homehosts run` tracked through daemon.json.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::config::{Config, HomeHostsPaths};

/// What `daemon start` recorded about the running watcher.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DaemonState {
    pub pid: u32,
    pub config_path: PathBuf,
    pub interval_secs: u64,
    pub started_at: String,
}

impl DaemonState {
    fn load(path: &Path) -> Result<Option<Self>> {
        let s = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        serde_json::from_str(&s)
            .map(Some)
            .with_context(|| format!("parse {}", path.display()))
    }

    /// Written through a temp file so `status` never reads half a record.
    fn save(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.flush()?;
        tmp.persist(path)
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

fn clear_state(paths: &HomeHostsPaths) -> Result<()> {
    match fs::remove_file(&paths.daemon_json) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(e).with_context(|| format!("remove {}", paths.daemon_json.display()))
        }
        _ => Ok(()),
    }
}

/// State of a watcher that is still alive. A record left by a dead process
/// is deleted.
fn live_state(paths: &HomeHostsPaths) -> Result<Option<DaemonState>> {
    let Some(state) = DaemonState::load(&paths.daemon_json)? else {
        return Ok(None);
    };
    if is_alive(state.pid) {
        return Ok(Some(state));
    }
    debug!(pid = state.pid, "clearing stale daemon state");
    clear_state(paths)?;
    Ok(None)
}

#[cfg(unix)]
fn send_signal(pid: u32, signal: libc::c_int) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    // SAFETY: kill(2) takes plain integers and touches no memory of ours.
    if unsafe { libc::kill(pid, signal) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Signal 0 probes for existence; EPERM still means the pid is taken.
#[cfg(unix)]
fn is_alive(pid: u32) -> bool {
    match send_signal(pid, 0) {
        Ok(()) => true,
        Err(e) => e.raw_os_error() == Some(libc::EPERM),
    }
}

#[cfg(not(unix))]
fn is_alive(_pid: u32) -> bool {
    false
}

/// Spawn `homehosts --config <file> run --every <n>` detached, appending its
/// log output to daemon.log, and record it in daemon.json.
pub fn start_daemon(paths: &HomeHostsPaths, config_path: &Path, interval_secs: u64) -> Result<()> {
    if let Some(state) = live_state(paths)? {
        bail!(
            "Daemon already running (pid={}). Use 'homehosts daemon stop' first.",
            state.pid
        );
    }

    // A detached child would only report a bad config to the log file.
    Config::load(config_path)?;
    let config_path = fs::canonicalize(config_path)
        .with_context(|| format!("resolve {}", config_path.display()))?;

    fs::create_dir_all(&paths.config_dir)?;
    let log = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.daemon_log)
        .with_context(|| format!("open {}", paths.daemon_log.display()))?;

    // The child inherits the environment, HOMEHOSTS_* overrides and RUST_LOG included.
    let exe = std::env::current_exe().context("locate homehosts executable")?;
    let mut cmd = Command::new(exe);
    cmd.arg("--config")
        .arg(&config_path)
        .args(["run", "--every", &interval_secs.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::from(log.try_clone()?))
        .stderr(Stdio::from(log));

    // Own process group, so a Ctrl-C in the launching terminal does not reach it.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let pid = cmd.spawn().context("spawn watcher")?.id();
    DaemonState {
        pid,
        config_path,
        interval_secs,
        started_at: chrono::Utc::now().to_rfc3339(),
    }
    .save(&paths.daemon_json)?;

    println!("Daemon started (pid={pid}), logging to {}", paths.daemon_log.display());
    Ok(())
}

/// SIGTERM the watcher. It leaves the hosts file as it last wrote it.
pub fn stop_daemon(paths: &HomeHostsPaths) -> Result<()> {
    let Some(state) = live_state(paths)? else {
        println!("Daemon not running");
        return Ok(());
    };
    terminate(state.pid)?;
    clear_state(paths)?;
    println!("Daemon stopped (pid={})", state.pid);
    Ok(())
}

/// The running watcher, or `None` (stale state is cleared).
pub fn daemon_status(paths: &HomeHostsPaths) -> Result<Option<DaemonState>> {
    live_state(paths)
}

/// SIGHUP the watcher so it re-reads its config file.
pub fn reload_daemon(paths: &HomeHostsPaths) -> Result<()> {
    let Some(state) = live_state(paths)? else {
        bail!("Daemon not running");
    };
    hangup(state.pid)?;
    println!(
        "Reload signal sent to daemon (pid={}), config {}",
        state.pid,
        state.config_path.display()
    );
    Ok(())
}

#[cfg(unix)]
fn terminate(pid: u32) -> Result<()> {
    send_signal(pid, libc::SIGTERM).with_context(|| format!("send SIGTERM to pid {pid}"))
}

#[cfg(unix)]
fn hangup(pid: u32) -> Result<()> {
    send_signal(pid, libc::SIGHUP).with_context(|| format!("send SIGHUP to pid {pid}"))
}

#[cfg(not(unix))]
fn terminate(_pid: u32) -> Result<()> {
    bail!("daemon stop is not supported on this platform")
}

#[cfg(not(unix))]
fn hangup(_pid: u32) -> Result<()> {
    bail!("daemon reload is not supported on this platform")
}
