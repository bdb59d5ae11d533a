//! Integration test for the render-side pipeline.
//!
//! Exercises: compute_line_changes → project_line_changes → ChangeCursor →
//! tokenize → splice_highlights → document_height / sync_ranges /
//! interpolate, the way a shell drives them for one file pair.

use revpane_core::{
    change::LineKind,
    compute_line_changes, document_height, interpolate, project_line_changes, splice_highlights,
    sync_ranges,
    tokenize::{file_ext, modified_change_highlight, original_change_highlight},
    ChangeCursor, DiffConfig, Node, ScrollSyncPoint, Side, LINE_HEIGHT,
};

const ORIGINAL: &str = "\
fn greet() {
    println!(\"hello\");
}";

const MODIFIED: &str = "\
fn greet() {
    println!(\"goodbye\");
    println!(\"again\");
}";

#[test]
fn pipeline_highlights_and_aligns_a_file_pair() {
    let config = DiffConfig::default();
    let changes = compute_line_changes(ORIGINAL, MODIFIED, &config);
    assert!(!changes.is_empty());

    let original_spans = project_line_changes(&changes, Side::Original);
    let modified_spans = project_line_changes(&changes, Side::Modified);
    assert_eq!(original_spans.len(), modified_spans.len());

    // Walk the modified pane's lines: line 2 is changed, line 3 inserted.
    let mut cursor = ChangeCursor::new(&modified_spans);
    let modified_lines: Vec<&str> = MODIFIED.split('\n').collect();
    let mut changed_lines = 0usize;
    let highlight = modified_change_highlight();

    let tokenized = revpane_core::tokenize(MODIFIED, file_ext("src/greet.rs"));
    assert_eq!(tokenized.len(), modified_lines.len());

    for (index, nodes) in tokenized.into_iter().enumerate() {
        let line = index as u32 + 1;
        match cursor.classify(line) {
            LineKind::Changed(span) => {
                changed_lines += 1;
                let char_spans = span.char_spans_on(line);
                let spliced = splice_highlights(nodes, &char_spans, &highlight);
                let flat: String = spliced.iter().map(Node::flat_text).collect();
                assert_eq!(flat, modified_lines[index], "splicing must not lose text");
            }
            LineKind::Unchanged | LineKind::InsertionPoint => {}
        }
    }
    assert!(changed_lines > 0, "the replacement region must be visited");

    // The original pane walks the same change list with its own styling.
    let mut original_cursor = ChangeCursor::new(&original_spans);
    let original_lines: Vec<&str> = ORIGINAL.split('\n').collect();
    let original_highlight = original_change_highlight();
    for (index, nodes) in revpane_core::tokenize(ORIGINAL, "rs").into_iter().enumerate() {
        let line = index as u32 + 1;
        if let LineKind::Changed(span) = original_cursor.classify(line) {
            let spliced = splice_highlights(nodes, &span.char_spans_on(line), &original_highlight);
            let flat: String = spliced.iter().map(Node::flat_text).collect();
            assert_eq!(flat, original_lines[index]);
        }
    }

    // The modified side grew, so the original pane's document height
    // accounts for the inserted lines and the scroll mapping is anchored.
    let original_line_count = ORIGINAL.split('\n').count();
    let height = document_height(original_line_count, &changes);
    assert!(height > original_line_count as u32 * LINE_HEIGHT);

    let anchors = sync_ranges(&original_spans, &modified_spans);
    assert!(!anchors.is_empty(), "a growing pair must contribute anchors");

    let mut points = vec![ScrollSyncPoint::new(0.0, 0.0)];
    let span = f64::from(height);
    points.extend(
        anchors
            .iter()
            .map(|p| ScrollSyncPoint::new(p.driving / span, p.driven / span)),
    );
    points.push(ScrollSyncPoint::new(1.0, 1.0));

    let mut last = 0.0;
    for step in 0..=50 {
        let value = interpolate(&points, f64::from(step) / 50.0);
        assert!(value >= last, "scroll mapping must be monotonic");
        last = value;
    }
    assert_eq!(interpolate(&points, 1.0), 1.0);
}
