//! revpane-git — the git-facing layer of revpane.
//!
//! Turns raw plumbing output into the [`types::Comparison`] aggregate the
//! review panes render from. Three concerns, three modules:
//!
//! - [`command`]: the abstract command runner and its `git` subprocess
//!   implementation. Everything above it sees only argument lists in and raw
//!   stdout text out, so tests can substitute canned output.
//! - [`parse`]: pure text to record parsers for the plumbing formats
//!   (changed-files listing, raw tree diff, blame, log). Malformed lines are
//!   logged and skipped, never fatal.
//! - [`compare`]: the orchestrator. Fans plumbing commands out over a
//!   commit set in two waves (tree diffs, then deduplicated blames) and
//!   merges the results by key.
//!
//! A failed command fails the whole build: the caller either gets a
//! complete [`types::Comparison`] or a [`GitError`], never a partial one.

pub mod command;
pub mod compare;
pub mod error;
pub mod parse;
pub mod types;

pub use command::{CommandRunner, GitCommandRunner};
pub use compare::{build_comparison, list_commits};
pub use error::GitError;
pub use types::{Commit, CommitFiles, Comparison, Diff, FileRecord, Patch, PatchStatus};
