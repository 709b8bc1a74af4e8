//! The managed hosts block: marker lines, locating it, inserting and removing it.
//!
//! All functions here work on an in-memory line sequence and never touch the
//! filesystem. See [`crate::hosts`] for the read/transform/write transaction.

pub mod locate;
pub mod write;

pub use locate::{
    contains_managed_region, find_foreign_anchor, find_managed_region_bounds, MarkerScan,
    RegionSpan,
};
pub use write::{build_block, insert_managed_region, remove_managed_region};

/// First line of the block this program owns.
pub const MANAGED_START: &str = "# --- HOMEHOSTS_CONTENT_START ---";

/// Last line of the block this program owns.
pub const MANAGED_END: &str = "# --- HOMEHOSTS_CONTENT_END ---";

/// Start marker written by SwitchHosts. Its block is never modified.
pub const FOREIGN_START: &str = "# --- SWITCHHOSTS_CONTENT_START ---";

/// Padding lines are exactly empty; whitespace-only lines count as content.
pub(crate) fn is_blank(line: &str) -> bool {
    line.is_empty()
}
