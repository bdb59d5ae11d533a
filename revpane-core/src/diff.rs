//! Binding to the line-diff computation.
//!
//! The diff algorithm itself lives in the `similar` crate; this module maps
//! its ops onto the two-sided [`LineChange`] contract the rest of the core
//! consumes. Pure insertions and deletions carry the 0 end-line sentinel on
//! the side that gained or lost nothing; replacements optionally carry
//! per-line char changes computed in a second, character-level pass.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp, TextDiff};

use crate::change::{CharChange, LineChange};

/// Knobs forwarded to the line-diff computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Compute sub-line char changes for replaced line runs.
    pub char_level: bool,
    /// Compare lines with surrounding whitespace trimmed.
    pub ignore_trim_whitespace: bool,
    /// Prefer slower, more readable hunk placement (patience algorithm).
    pub pretty: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { char_level: true, ignore_trim_whitespace: true, pretty: true }
    }
}

/// Diffs `original` against `modified` line by line.
///
/// Returns one [`LineChange`] per contiguous divergent region, in document
/// order. Line numbers are 1-based; a pure insertion reports
/// `original_end_line == 0` (the insertion sits after `original_start_line`),
/// and a pure deletion mirrors that on the modified side.
pub fn compute_line_changes(original: &str, modified: &str, config: &DiffConfig) -> Vec<LineChange> {
    let old_lines: Vec<&str> = original.split('\n').collect();
    let new_lines: Vec<&str> = modified.split('\n').collect();

    // Trim-insensitive comparison diffs trimmed keys but keeps the raw lines
    // around for the char-level pass, so columns stay real.
    let old_keys: Vec<&str> = if config.ignore_trim_whitespace {
        old_lines.iter().map(|l| l.trim()).collect()
    } else {
        old_lines.clone()
    };
    let new_keys: Vec<&str> = if config.ignore_trim_whitespace {
        new_lines.iter().map(|l| l.trim()).collect()
    } else {
        new_lines.clone()
    };

    let algorithm = if config.pretty { Algorithm::Patience } else { Algorithm::Myers };
    let diff = TextDiff::configure().algorithm(algorithm).diff_slices(&old_keys, &new_keys);

    let mut changes = Vec::new();
    for op in diff.ops() {
        let change = match *op {
            DiffOp::Equal { .. } => continue,
            DiffOp::Delete { old_index, old_len, new_index } => LineChange {
                original_start_line: old_index as u32 + 1,
                original_end_line: (old_index + old_len) as u32,
                modified_start_line: new_index as u32,
                modified_end_line: 0,
                char_changes: None,
            },
            DiffOp::Insert { old_index, new_index, new_len } => LineChange {
                original_start_line: old_index as u32,
                original_end_line: 0,
                modified_start_line: new_index as u32 + 1,
                modified_end_line: (new_index + new_len) as u32,
                char_changes: None,
            },
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                let char_changes = if config.char_level {
                    let spans = char_changes_for(
                        &old_lines[old_index..old_index + old_len],
                        &new_lines[new_index..new_index + new_len],
                        old_index as u32 + 1,
                        new_index as u32 + 1,
                    );
                    if spans.is_empty() { None } else { Some(spans) }
                } else {
                    None
                };
                LineChange {
                    original_start_line: old_index as u32 + 1,
                    original_end_line: (old_index + old_len) as u32,
                    modified_start_line: new_index as u32 + 1,
                    modified_end_line: (new_index + new_len) as u32,
                    char_changes,
                }
            }
        };
        changes.push(change);
    }
    changes
}

/// Character-level pass over a replaced run: lines are paired 1:1 up to the
/// shorter side; each pair is char-diffed and every divergent op becomes one
/// [`CharChange`]. Columns are 1-based character positions.
fn char_changes_for(old: &[&str], new: &[&str], old_start: u32, new_start: u32) -> Vec<CharChange> {
    let mut spans = Vec::new();
    for (offset, (old_text, new_text)) in old.iter().zip(new.iter()).enumerate() {
        let old_line = old_start + offset as u32;
        let new_line = new_start + offset as u32;
        let diff = TextDiff::from_chars(*old_text, *new_text);
        for op in diff.ops() {
            let (old_from, old_to, new_from, new_to) = match *op {
                DiffOp::Equal { .. } => continue,
                DiffOp::Delete { old_index, old_len, new_index } => {
                    (old_index, old_index + old_len, new_index, new_index)
                }
                DiffOp::Insert { old_index, new_index, new_len } => {
                    (old_index, old_index, new_index, new_index + new_len)
                }
                DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                    (old_index, old_index + old_len, new_index, new_index + new_len)
                }
            };
            spans.push(CharChange {
                original_start_line: old_line,
                original_start_column: old_from as u32 + 1,
                original_end_line: old_line,
                original_end_column: old_to as u32 + 1,
                modified_start_line: new_line,
                modified_start_column: new_from as u32 + 1,
                modified_end_line: new_line,
                modified_end_column: new_to as u32 + 1,
            });
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_content_yields_no_changes() {
        let changes = compute_line_changes("a\nb\nc", "a\nb\nc", &DiffConfig::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn replacement_maps_symmetric_ranges() {
        let changes = compute_line_changes("a\nb\nc", "a\nx\nc", &DiffConfig::default());
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.original_start_line, 2);
        assert_eq!(change.original_end_line, 2);
        assert_eq!(change.modified_start_line, 2);
        assert_eq!(change.modified_end_line, 2);
        let chars = change.char_changes.as_ref().expect("char-level pass enabled");
        assert_eq!(chars.len(), 1);
        assert_eq!(chars[0].original_start_column, 1);
        assert_eq!(chars[0].original_end_column, 2);
        assert_eq!(chars[0].modified_start_column, 1);
        assert_eq!(chars[0].modified_end_column, 2);
    }

    #[test]
    fn insertion_carries_zero_sentinel_on_original_side() {
        let changes = compute_line_changes("a\nc", "a\nb\nc", &DiffConfig::default());
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.original_start_line, 1);
        assert_eq!(change.original_end_line, 0);
        assert_eq!(change.modified_start_line, 2);
        assert_eq!(change.modified_end_line, 2);
    }

    #[test]
    fn deletion_carries_zero_sentinel_on_modified_side() {
        let changes = compute_line_changes("a\nb\nc", "a\nc", &DiffConfig::default());
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.original_start_line, 2);
        assert_eq!(change.original_end_line, 2);
        assert_eq!(change.modified_start_line, 1);
        assert_eq!(change.modified_end_line, 0);
    }

    #[test]
    fn trim_insensitive_comparison_ignores_indentation_shifts() {
        let config = DiffConfig { ignore_trim_whitespace: true, ..DiffConfig::default() };
        let changes = compute_line_changes("a\n  b\nc", "a\nb  \nc", &config);
        assert!(changes.is_empty());

        let strict = DiffConfig { ignore_trim_whitespace: false, ..DiffConfig::default() };
        assert_eq!(compute_line_changes("a\n  b\nc", "a\nb  \nc", &strict).len(), 1);
    }

    #[test]
    fn char_level_can_be_disabled() {
        let config = DiffConfig { char_level: false, ..DiffConfig::default() };
        let changes = compute_line_changes("a\nb\nc", "a\nx\nc", &config);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].char_changes.is_none());
    }

    #[test]
    fn multi_line_replacement_pairs_lines_for_char_changes() {
        let changes = compute_line_changes("one\nfoo bar\nbaz qux", "one\nfoo car\nbaz quux", &DiffConfig::default());
        assert_eq!(changes.len(), 1);
        let chars = changes[0].char_changes.as_ref().expect("char spans");
        assert!(chars.iter().any(|c| c.original_start_line == 2));
        assert!(chars.iter().any(|c| c.original_start_line == 3));
        // Every span stays within its own line on both sides.
        for span in chars {
            assert_eq!(span.original_start_line, span.original_end_line);
            assert_eq!(span.modified_start_line, span.modified_end_line);
        }
    }
}
