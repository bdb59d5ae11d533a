//! Error taxonomy for the git-facing layer.

use std::io;

use thiserror::Error;

/// Errors surfaced by the command runner and the comparison build.
///
/// Parse anomalies are deliberately not represented here: a malformed
/// plumbing line is logged and skipped, never turned into an error. Only
/// process-level failures abort a build.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process could not be spawned or its output not collected.
    #[error("failed to run git: {0}")]
    Io(#[from] io::Error),
    /// git ran but exited non-zero.
    #[error("{command} exited with status {status}: {stderr}")]
    Command {
        /// The full command line that failed.
        command: String,
        /// Process exit code, or -1 if terminated by a signal.
        status: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}
