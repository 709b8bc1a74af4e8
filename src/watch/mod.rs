//! Poll loop and one-shot operations on the hosts file.

pub mod daemon;
pub mod tracker;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::platform::{HostsEditor, NetworkProbe};

pub use tracker::{decide, HostsState, TickAction, TickOutcome, Tracker};

/// Default poll interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Everything a tick needs.
pub struct Context {
    pub config: Config,
    /// Re-read on reload; `None` disables reloading.
    pub config_path: Option<PathBuf>,
    pub probe: Box<dyn NetworkProbe>,
    pub editor: Box<dyn HostsEditor>,
}

/// Insert the managed block regardless of the current network.
pub fn apply_once(ctx: &Context) -> crate::error::Result<bool> {
    ctx.editor.insert_region(&ctx.config.hosts)
}

/// Remove the managed block regardless of the current network.
pub fn restore_once(editor: &dyn HostsEditor) -> crate::error::Result<bool> {
    editor.remove_region()
}

/// Single tick starting from an unknown state.
pub fn check_once(ctx: &Context) -> TickOutcome {
    Tracker::new().tick(ctx)
}

/// Tick every `interval` until interrupted. SIGHUP reloads the config.
pub async fn run_forever(mut ctx: Context, interval: Duration) -> Result<()> {
    let mut signals = Signals::new()?;
    let mut tracker = Tracker::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_secs = interval.as_secs(),
        hosts = %ctx.editor.path().display(),
        "watching network"
    );
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Ticks run inline; nothing else shares this runtime.
                tracker.tick(&ctx);
            }
            signal = signals.recv() => match signal {
                Signal::Shutdown => {
                    info!("shutting down");
                    return Ok(());
                }
                Signal::Reload => reload(&mut ctx, &mut tracker),
            },
        }
    }
}

/// Re-read the config. A bad file keeps the old config. Changed host lines
/// remove the block so the next tick writes the new ones; if that removal
/// fails the old config stays in place and a later reload can retry.
pub fn reload(ctx: &mut Context, tracker: &mut Tracker) {
    let Some(path) = ctx.config_path.clone() else {
        warn!("no config path, ignoring reload");
        return;
    };
    let config = match Config::load(&path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "config reload failed, keeping previous config");
            return;
        }
    };
    if config == ctx.config {
        info!("config unchanged");
        return;
    }
    if config.hosts != ctx.config.hosts {
        // The old block must go first; insert leaves an existing block alone.
        if let Err(e) = ctx.editor.remove_region() {
            error!(error = %e, "could not remove previous hosts block, keeping previous config");
            return;
        }
    }
    ctx.config = config;
    tracker.reset();
    info!(path = %path.display(), "config reloaded");
}

enum Signal {
    Shutdown,
    Reload,
}

struct Signals {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
}

impl Signals {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(&mut self) -> Signal {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => Signal::Shutdown,
            _ = self.terminate.recv() => Signal::Shutdown,
            _ = self.hangup.recv() => Signal::Reload,
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> Signal {
        let _ = tokio::signal::ctrl_c().await;
        Signal::Shutdown
    }
}
