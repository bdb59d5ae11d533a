//! Scroll synchronization between the two panes.
//!
//! The two panes render different line counts, so a shared scrollbar cannot
//! drive both with one ratio. Instead, change pairs that grow the modified
//! side become anchor points where the panes must coincide, and positions in
//! between are linearly interpolated. The resulting mapping is continuous,
//! monotonic, and piecewise-linear.

use serde::{Deserialize, Serialize};

use crate::change::{LineChange, LineSpan};

/// Height of one rendered line in pixels.
pub const LINE_HEIGHT: u32 = 15;

/// A pair of vertical offsets that must coincide while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSyncPoint {
    /// Offset on the side driving the scroll.
    pub driving: f64,
    /// The matching offset on the driven side.
    pub driven: f64,
}

impl ScrollSyncPoint {
    pub fn new(driving: f64, driven: f64) -> Self {
        Self { driving, driven }
    }

    /// The same anchor with the roles reversed.
    pub fn swapped(self) -> Self {
        Self { driving: self.driven, driven: self.driving }
    }
}

/// Total pixel height of a rendered file: its own line count plus the net
/// lines the changes add (counted only where the modified side outgrows the
/// original side), times the fixed line height.
pub fn document_height(line_count: usize, changes: &[LineChange]) -> u32 {
    let added: i64 = changes.iter().map(net_added_lines).filter(|n| *n > 0).sum();
    (line_count as i64 + added).max(0) as u32 * LINE_HEIGHT
}

fn net_added_lines(change: &LineChange) -> i64 {
    let modified = if change.modified_end_line == 0 {
        0
    } else {
        i64::from(change.modified_end_line) - i64::from(change.modified_start_line) + 1
    };
    let original = if change.original_end_line == 0 {
        0
    } else {
        i64::from(change.original_end_line) - i64::from(change.original_start_line) + 1
    };
    modified - original
}

fn span_lines(span: &LineSpan) -> i64 {
    if span.end_line == 0 {
        0
    } else {
        i64::from(span.end_line) - i64::from(span.start_line) + 1
    }
}

/// Builds the sync anchors for a projected change-pair list.
///
/// `original` and `modified` must be the two projections of the same change
/// list, so they are index-aligned. Only pairs where the modified side is
/// strictly longer contribute anchors: one at the pair's start lines and one
/// at its end lines (an end line of 0 collapses to the start for that side).
/// Points are emitted in line units with the original side driving; callers
/// normalize and prepend (0,0) / append (1,1) before interpolating.
///
/// # Panics
///
/// Panics if the two lists differ in length — that means they were not
/// projected from the same change list, which is a bug in the caller.
pub fn sync_ranges(original: &[LineSpan], modified: &[LineSpan]) -> Vec<ScrollSyncPoint> {
    assert_eq!(
        original.len(),
        modified.len(),
        "sync_ranges requires index-aligned projections"
    );

    let mut points = Vec::new();
    for (o, m) in original.iter().zip(modified) {
        if span_lines(m) <= span_lines(o) {
            continue;
        }
        points.push(ScrollSyncPoint::new(
            f64::from(o.start_line),
            f64::from(m.start_line),
        ));
        points.push(ScrollSyncPoint::new(
            f64::from(o.effective_end_line()),
            f64::from(m.effective_end_line()),
        ));
    }
    points
}

/// Maps a position on the driving side to the driven side by linear
/// interpolation between the bracketing sync points.
///
/// `points` must be ordered by driving offset. The bracket is the first
/// point whose driving value exceeds `position` together with its
/// predecessor; positions past the last point use the final bracket, and
/// positions before the first use the initial one. A zero-width bracket
/// returns its start, keeping the mapping total.
///
/// # Panics
///
/// Panics with fewer than two points — a single point cannot bound a range,
/// and callers are expected to have added the (0,0) and (1,1) anchors.
pub fn interpolate(points: &[ScrollSyncPoint], position: f64) -> f64 {
    assert!(points.len() >= 2, "interpolation requires at least two sync points");

    let mut upper = points
        .iter()
        .position(|p| p.driving > position)
        .unwrap_or(points.len() - 1);
    if upper == 0 {
        upper = 1;
    }
    let low = points[upper - 1];
    let high = points[upper];

    let width = high.driving - low.driving;
    if width == 0.0 {
        return low.driven;
    }
    let t = (position - low.driving) / width;
    low.driven + t * (high.driven - low.driven)
}
