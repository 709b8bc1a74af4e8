//! Marker lookup and padding-aware ranges.

use std::ops::Range;

use tracing::warn;

use super::{is_blank, FOREIGN_START, MANAGED_END, MANAGED_START};
use crate::error::MarkerInconsistency;

/// Half-open line range `[start, end)` covering the managed block plus the
/// blank padding line directly above its start marker and directly below its
/// end marker, when those lines exist.
///
/// Invariants: `start <= start marker < end marker < end <= lines.len()`, and
/// every line in the range that is outside the marker pair is blank. Removing
/// the range never touches a non-blank line outside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpan {
    start: usize,
    end: usize,
}

impl RegionSpan {
    /// Build from the indices of the start and end marker lines.
    /// Returns `None` unless `start_marker < end_marker < lines.len()`.
    pub fn around<S: AsRef<str>>(
        lines: &[S],
        start_marker: usize,
        end_marker: usize,
    ) -> Option<Self> {
        if start_marker >= end_marker || end_marker >= lines.len() {
            return None;
        }
        let start = match start_marker.checked_sub(1) {
            Some(above) if is_blank(lines[above].as_ref()) => above,
            _ => start_marker,
        };
        let end = match lines.get(end_marker + 1) {
            Some(below) if is_blank(below.as_ref()) => end_marker + 2,
            _ => end_marker + 1,
        };
        Some(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Positions of every managed marker line, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScan {
    pub starts: Vec<usize>,
    pub ends: Vec<usize>,
}

impl MarkerScan {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut scan = Self::default();
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.contains(MANAGED_START) {
                scan.starts.push(i);
            }
            if line.contains(MANAGED_END) {
                scan.ends.push(i);
            }
        }
        scan
    }

    /// No marker of either kind.
    pub fn is_absent(&self) -> bool {
        self.starts.is_empty() && self.ends.is_empty()
    }

    /// The single well-ordered marker pair as `(start, end)` indices.
    /// `Ok(None)` when neither marker is present.
    pub fn pair(&self) -> Result<Option<(usize, usize)>, MarkerInconsistency> {
        let one_based = |v: &[usize]| v.iter().map(|i| i + 1).collect::<Vec<_>>();
        if self.starts.len() > 1 {
            return Err(MarkerInconsistency::DuplicateStart {
                lines: one_based(&self.starts),
            });
        }
        if self.ends.len() > 1 {
            return Err(MarkerInconsistency::DuplicateEnd {
                lines: one_based(&self.ends),
            });
        }
        match (self.starts.first().copied(), self.ends.first().copied()) {
            (None, None) => Ok(None),
            (Some(start), None) => Err(MarkerInconsistency::MissingEnd { start: start + 1 }),
            (None, Some(end)) => Err(MarkerInconsistency::MissingStart { end: end + 1 }),
            (Some(start), Some(end)) if end <= start => {
                Err(MarkerInconsistency::EndBeforeStart {
                    start: start + 1,
                    end: end + 1,
                })
            }
            (Some(start), Some(end)) => Ok(Some((start, end))),
        }
    }
}

/// True if any line carries the managed start marker.
pub fn contains_managed_region<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|l| l.as_ref().contains(MANAGED_START))
}

/// Index at which the managed block goes so it sits directly above the
/// SwitchHosts block: the blank line above the foreign marker if there is
/// one, otherwise the marker line itself.
pub fn find_foreign_anchor<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    let marker = lines
        .iter()
        .position(|l| l.as_ref().contains(FOREIGN_START))?;
    match marker.checked_sub(1) {
        Some(above) if is_blank(lines[above].as_ref()) => Some(above),
        _ => Some(marker),
    }
}

/// Span of the managed block including its padding, or `None` if the block
/// is absent. Inconsistent markers are logged and treated as absent.
pub fn find_managed_region_bounds<S: AsRef<str>>(lines: &[S]) -> Option<RegionSpan> {
    match MarkerScan::new(lines).pair() {
        Ok(Some((start, end))) => RegionSpan::around(lines, start, end),
        Ok(None) => None,
        Err(issue) => {
            warn!(%issue, "managed hosts markers are inconsistent; treating block as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_takes_padding_on_both_sides() {
        let lines = ["a", "", MANAGED_START, "x", MANAGED_END, "", "b"];
        let span = RegionSpan::around(&lines, 2, 4).unwrap();
        assert_eq!(span.range(), 1..6);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn span_without_padding_stops_at_markers() {
        let lines = ["a", MANAGED_START, "x", MANAGED_END, "b"];
        let span = RegionSpan::around(&lines, 1, 3).unwrap();
        assert_eq!(span.range(), 1..4);
    }

    #[test]
    fn span_at_file_edges() {
        let lines = [MANAGED_START, "x", MANAGED_END];
        let span = RegionSpan::around(&lines, 0, 2).unwrap();
        assert_eq!(span.range(), 0..3);
    }

    #[test]
    fn whitespace_only_line_is_not_padding() {
        let lines = ["a", " ", MANAGED_START, MANAGED_END, "\t"];
        let span = RegionSpan::around(&lines, 2, 3).unwrap();
        assert_eq!(span.range(), 2..4);
    }

    #[test]
    fn span_rejects_bad_indices() {
        let lines = [MANAGED_START, MANAGED_END];
        assert!(RegionSpan::around(&lines, 1, 0).is_none());
        assert!(RegionSpan::around(&lines, 0, 2).is_none());
    }
}
