//! Two-sided change contract and per-side projection.
//!
//! The line-diff computation itself is external (see [`crate::diff`]); this
//! module owns the shape of its output and everything that reads that shape:
//! the projection that reduces a two-sided change to one pane's coordinates,
//! and the cursor a renderer uses to walk its lines against the projected
//! list.
//!
//! All line numbers are 1-based. An end line of 0 is a sentinel meaning the
//! change occupies no lines on that side — a pure insertion (or deletion)
//! point sitting immediately after the start line. Projections must carry the
//! sentinel through unchanged; coercing it to the start line would turn an
//! insertion marker into a one-line region.

use serde::{Deserialize, Serialize};

/// One contiguous region where original and modified content diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    pub original_start_line: u32,
    pub original_end_line: u32,
    pub modified_start_line: u32,
    pub modified_end_line: u32,
    /// Sub-line edit spans, present when char-level diffing was requested.
    pub char_changes: Option<Vec<CharChange>>,
}

/// A sub-line edit span within a [`LineChange`].
///
/// Columns are 1-based; the end column is the position immediately after the
/// last affected character, pairing with the start/end line convention for
/// spans that cross line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharChange {
    pub original_start_line: u32,
    pub original_start_column: u32,
    pub original_end_line: u32,
    pub original_end_column: u32,
    pub modified_start_line: u32,
    pub modified_start_column: u32,
    pub modified_end_line: u32,
    pub modified_end_column: u32,
}

/// Which pane of a two-way comparison a projection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Modified,
}

/// A [`LineChange`] reduced to one side's coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start_line: u32,
    /// 0 marks a pure insertion point after `start_line` on this side.
    pub end_line: u32,
    pub char_spans: Option<Vec<CharSpan>>,
}

/// A [`CharChange`] reduced to one side's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSpan {
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl LineSpan {
    /// The char spans that start on `line`, in input order.
    pub fn char_spans_on(&self, line: u32) -> Vec<CharSpan> {
        self.char_spans
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|span| span.start_line == line)
            .copied()
            .collect()
    }

    /// The last line this span covers; an insertion point collapses to its
    /// start line.
    pub fn effective_end_line(&self) -> u32 {
        if self.end_line == 0 {
            self.start_line
        } else {
            self.end_line
        }
    }
}

/// Projects two-sided changes onto one pane.
///
/// The result is order- and length-preserving: the Nth output corresponds
/// exactly to the Nth input, which is what lets the scroll mapper pair the
/// two projections back up by index.
pub fn project_line_changes(changes: &[LineChange], side: Side) -> Vec<LineSpan> {
    changes
        .iter()
        .map(|change| match side {
            Side::Original => LineSpan {
                start_line: change.original_start_line,
                end_line: change.original_end_line,
                char_spans: change.char_changes.as_deref().map(|chars| {
                    chars
                        .iter()
                        .map(|c| CharSpan {
                            start_line: c.original_start_line,
                            end_line: c.original_end_line,
                            start_column: c.original_start_column,
                            end_column: c.original_end_column,
                        })
                        .collect()
                }),
            },
            Side::Modified => LineSpan {
                start_line: change.modified_start_line,
                end_line: change.modified_end_line,
                char_spans: change.char_changes.as_deref().map(|chars| {
                    chars
                        .iter()
                        .map(|c| CharSpan {
                            start_line: c.modified_start_line,
                            end_line: c.modified_end_line,
                            start_column: c.modified_start_column,
                            end_column: c.modified_end_column,
                        })
                        .collect()
                }),
            },
        })
        .collect()
}

/// How one rendered line relates to the projected change list.
#[derive(Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Outside every change region.
    Unchanged,
    /// A pure insertion sits immediately after this line on this side.
    InsertionPoint,
    /// Inside a change region.
    Changed(&'a LineSpan),
}

/// Walks rendered lines, in order, against a projected change list.
///
/// The cursor is an explicit index into an immutable span slice; each call to
/// [`ChangeCursor::classify`] advances past regions the line has already
/// passed and classifies the line against the current one. Lines must be
/// presented in ascending order.
#[derive(Debug)]
pub struct ChangeCursor<'a> {
    spans: &'a [LineSpan],
    index: usize,
}

impl<'a> ChangeCursor<'a> {
    pub fn new(spans: &'a [LineSpan]) -> Self {
        Self { spans, index: 0 }
    }

    /// Classifies `line` (1-based) against the change list.
    pub fn classify(&mut self, line: u32) -> LineKind<'a> {
        loop {
            let Some(span) = self.spans.get(self.index) else {
                return LineKind::Unchanged;
            };

            // A start line of 0 is the whole-file marker emitted for added or
            // deleted files; it names no region on this side.
            if span.start_line == 0 {
                self.index += 1;
                continue;
            }

            if span.end_line == 0 {
                if line < span.start_line {
                    return LineKind::Unchanged;
                }
                self.index += 1;
                if line == span.start_line {
                    return LineKind::InsertionPoint;
                }
                continue;
            }

            if line < span.start_line {
                return LineKind::Unchanged;
            }
            if line <= span.end_line {
                return LineKind::Changed(span);
            }
            self.index += 1;
        }
    }
}
