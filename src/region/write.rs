//! Pure insert/remove of the managed block over a line sequence.

use tracing::{debug, info, warn};

use super::locate::{find_foreign_anchor, find_managed_region_bounds, MarkerScan};
use super::{MANAGED_END, MANAGED_START};

/// The managed block as written to disk: blank, start marker, blank, host
/// lines, blank, end marker, blank.
pub fn build_block<S: AsRef<str>>(host_lines: &[S]) -> Vec<String> {
    let mut block = Vec::with_capacity(host_lines.len() + 6);
    block.extend([String::new(), MANAGED_START.to_string(), String::new()]);
    block.extend(host_lines.iter().map(|l| l.as_ref().to_string()));
    block.extend([String::new(), MANAGED_END.to_string(), String::new()]);
    block
}

/// Insert the managed block above the SwitchHosts block, or at the end of the
/// file when there is none. Unchanged if there is nothing to insert or if any
/// managed marker is already present, including a stray or damaged one.
pub fn insert_managed_region<S: AsRef<str>>(
    mut lines: Vec<String>,
    host_lines: &[S],
) -> Vec<String> {
    if host_lines.is_empty() {
        info!("no host lines configured, leaving hosts file unchanged");
        return lines;
    }
    let scan = MarkerScan::new(&lines);
    if !scan.is_absent() {
        match scan.pair() {
            Ok(_) => info!("managed hosts block already present"),
            Err(issue) => warn!(%issue, "hosts markers inconsistent, leaving hosts file unchanged"),
        }
        return lines;
    }

    let block = build_block(host_lines);
    match find_foreign_anchor(&lines) {
        Some(at) => {
            debug!(line = at + 1, "inserting managed block above SwitchHosts block");
            lines.splice(at..at, block);
        }
        None => {
            debug!("appending managed block");
            lines.extend(block);
        }
    }
    lines
}

/// Remove the managed block and its padding. Unchanged if the block is
/// absent or its markers are inconsistent.
pub fn remove_managed_region(mut lines: Vec<String>) -> Vec<String> {
    let Some(span) = find_managed_region_bounds(&lines) else {
        info!("managed hosts block not present");
        return lines;
    };
    debug!(start = span.start() + 1, end = span.end(), "removing managed block");
    lines.drain(span.range());
    lines
}
