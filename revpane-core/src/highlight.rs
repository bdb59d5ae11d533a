//! Tokenized node model and character-level highlight splicing.
//!
//! A rendered line is a sequence of [`Node`]s produced by the tokenizer. The
//! splicer overlays char-change highlighting onto that sequence without
//! disturbing token boundaries it does not have to touch: nodes outside a
//! span pass through untouched, nodes inside it are re-wrapped, and nodes
//! straddling a span edge are split at the exact column.
//!
//! The style type is opaque here — the splicer never inspects it, only
//! clones it around while rebuilding nodes.

use crate::change::CharSpan;

/// A node in a tokenized line: bare text, or a styled container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Text(String),
    Span { style: S, children: Vec<Node<S>> },
}

impl<S> Node<S> {
    /// Recursively flattened text content.
    pub fn flat_text(&self) -> String {
        match self {
            Node::Text(value) => value.clone(),
            Node::Span { children, .. } => children.iter().map(Node::flat_text).collect(),
        }
    }
}

/// Applies `style` to the column ranges named by `spans`.
///
/// Spans are applied sequentially, each against the result of the previous
/// application, so later spans see the node boundaries earlier ones
/// introduced. A span whose end column is at or before its start column
/// touches nothing; if every span is empty the input vector is returned
/// unchanged (same allocation).
pub fn splice_highlights<S: Clone>(
    nodes: Vec<Node<S>>,
    spans: &[CharSpan],
    style: &S,
) -> Vec<Node<S>> {
    let mut nodes = nodes;
    for span in spans {
        if span.end_column <= span.start_column {
            continue;
        }
        nodes = apply_span(nodes, span, style);
    }
    nodes
}

/// One left-to-right walk applying a single span.
///
/// `start_column` tracks the first column of the current node (1-based); a
/// node's covered range is half-open `[start_column, end_column)` where the
/// end is derived from its flattened character length.
fn apply_span<S: Clone>(nodes: Vec<Node<S>>, span: &CharSpan, style: &S) -> Vec<Node<S>> {
    let mut out = Vec::with_capacity(nodes.len() + 2);
    let mut start_column: u32 = 1;

    for node in nodes {
        let text = node.flat_text();
        let end_column = start_column + text.chars().count() as u32;

        if span.end_column <= start_column || span.start_column >= end_column {
            // Entirely outside the span.
            out.push(node);
        } else if span.start_column <= start_column && span.end_column >= end_column {
            // Entirely inside the span: re-wrap, children preserved.
            out.push(Node::Span { style: style.clone(), children: vec![node] });
        } else if start_column <= span.start_column && end_column >= span.end_column {
            // Node contains the span: unstyled head, styled middle, unstyled tail.
            let head = (span.start_column - start_column) as usize;
            let tail = (span.end_column - start_column) as usize;
            push_piece(&mut out, &node, slice_chars(&text, 0, head), None);
            push_piece(&mut out, &node, slice_chars(&text, head, tail), Some(style));
            push_piece(&mut out, &node, slice_chars(&text, tail, usize::MAX), None);
        } else if span.start_column <= start_column {
            // Span covers the head of the node.
            let split = (span.end_column - start_column) as usize;
            push_piece(&mut out, &node, slice_chars(&text, 0, split), Some(style));
            push_piece(&mut out, &node, slice_chars(&text, split, usize::MAX), None);
        } else {
            // Span covers the tail of the node.
            let split = (span.start_column - start_column) as usize;
            push_piece(&mut out, &node, slice_chars(&text, 0, split), None);
            push_piece(&mut out, &node, slice_chars(&text, split, usize::MAX), Some(style));
        }

        start_column = end_column;
    }

    out
}

/// Character-indexed substring, end-saturating.
fn slice_chars(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}

/// Rebuilds one split piece from `node`'s shell around new text, wrapping it
/// in a highlight span when a style is given. A bare text leaf gains a
/// wrapper only when a style must be applied; empty pieces are dropped.
fn push_piece<S: Clone>(out: &mut Vec<Node<S>>, node: &Node<S>, text: String, style: Option<&S>) {
    if text.is_empty() {
        return;
    }
    let piece = match node {
        Node::Span { style: own, .. } => {
            Node::Span { style: own.clone(), children: vec![Node::Text(text)] }
        }
        Node::Text(_) => Node::Text(text),
    };
    match style {
        Some(style) => out.push(Node::Span { style: style.clone(), children: vec![piece] }),
        None => out.push(piece),
    }
}
