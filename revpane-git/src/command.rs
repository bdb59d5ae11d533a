//! Abstract command runner and its `git` subprocess implementation.
//!
//! The orchestrator is written against [`CommandRunner`] so tests can feed
//! it canned plumbing output; [`GitCommandRunner`] is the production
//! implementation backed by `tokio::process`.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::GitError;

/// Executes one plumbing command against a repository and returns its raw
/// standard output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `git <args…>` inside `repo_path` and collects stdout.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if the process cannot be spawned or exits
    /// non-zero.
    async fn run(&self, repo_path: &Path, args: &[String]) -> Result<String, GitError>;
}

/// Production runner: spawns the `git` binary in the repository directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommandRunner;

#[async_trait]
impl CommandRunner for GitCommandRunner {
    async fn run(&self, repo_path: &Path, args: &[String]) -> Result<String, GitError> {
        let output = Command::new("git").args(args).current_dir(repo_path).output().await?;

        if !output.status.success() {
            return Err(GitError::Command {
                command: format!("git {}", args.join(" ")),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
