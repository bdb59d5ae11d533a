//! revpane-core — pure computation for side-by-side commit review.
//!
//! Everything in this crate is a value-in/value-out transform: no I/O, no
//! process spawning, no shared mutable state. The git-facing layer lives in
//! the sibling `revpane-git` crate.
//!
//! Module map:
//! - [`diff`]: binds the line-diff computation (the `similar` crate) to the
//!   two-sided [`change::LineChange`] contract.
//! - [`change`]: the change contract types, per-side projection, and the
//!   cursor that walks rendered lines against a projected change list.
//! - [`highlight`]: the tokenized node model and character-level highlight
//!   splicing.
//! - [`tokenize`]: syntax tokenization (the `syntect` crate) into the node
//!   model.
//! - [`scroll`]: document heights, scroll sync anchors, and piecewise-linear
//!   interpolation between the two panes.

pub mod change;
pub mod diff;
pub mod highlight;
pub mod scroll;
pub mod tokenize;

pub use change::{
    project_line_changes, ChangeCursor, CharChange, CharSpan, LineChange, LineKind, LineSpan,
    Side,
};
pub use diff::{compute_line_changes, DiffConfig};
pub use highlight::{splice_highlights, Node};
pub use scroll::{document_height, interpolate, sync_ranges, ScrollSyncPoint, LINE_HEIGHT};
pub use tokenize::{tokenize, TokenStyle};
