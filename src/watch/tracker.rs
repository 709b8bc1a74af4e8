//! Edge-triggered state tracking: write the hosts file only when the desired
//! state differs from the last one written.

use std::fmt;

use tracing::{error, info, warn};

use super::Context;
use crate::config::Config;
use crate::error::ProbeError;

/// Whether the managed block should be in the hosts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsState {
    Applied,
    Restored,
}

impl fmt::Display for HostsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostsState::Applied => f.write_str("applied"),
            HostsState::Restored => f.write_str("restored"),
        }
    }
}

/// Applied on a recognized SSID; a failed probe counts as away.
pub fn decide(config: &Config, network: &Result<String, ProbeError>) -> HostsState {
    match network {
        Ok(ssid) if config.recognizes(ssid) => HostsState::Applied,
        _ => HostsState::Restored,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Desired state already written on an earlier tick.
    Skipped,
    /// Editor ran; `written` is false when the file already matched.
    Synced { written: bool },
    /// Editor failed; state left as it was so the next tick retries.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub network: Option<String>,
    pub desired: HostsState,
    pub action: TickAction,
}

/// Last state successfully written; `None` until the first write.
#[derive(Debug, Default)]
pub struct Tracker {
    last: Option<HostsState>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_applied(&self) -> Option<HostsState> {
        self.last
    }

    /// Forget the last state so the next tick writes unconditionally.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Probe the network once and bring the hosts file in line with it.
    pub fn tick(&mut self, ctx: &Context) -> TickOutcome {
        let network = ctx.probe.current_network();
        match &network {
            Ok(ssid) => info!(%ssid, "current network"),
            Err(e) => warn!(error = %e, "cannot determine current network"),
        }
        let desired = decide(&ctx.config, &network);
        let network = network.ok();

        if self.last == Some(desired) {
            info!(state = %desired, "hosts already up to date, skip");
            return TickOutcome {
                network,
                desired,
                action: TickAction::Skipped,
            };
        }

        info!(state = %desired, "updating hosts");
        let result = match desired {
            HostsState::Applied => ctx.editor.insert_region(&ctx.config.hosts),
            HostsState::Restored => ctx.editor.remove_region(),
        };
        let action = match result {
            Ok(written) => {
                self.last = Some(desired);
                TickAction::Synced { written }
            }
            Err(e) => {
                error!(error = %e, state = %desired, "hosts update failed, will retry next tick");
                TickAction::Failed
            }
        };
        TickOutcome {
            network,
            desired,
            action,
        }
    }
}
