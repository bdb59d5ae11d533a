//! The comparison orchestrator.
//!
//! Builds one [`Comparison`] for an ordered commit set in two fan-out waves:
//!
//! 1. One changed-files listing covering every hash, plus one raw tree diff
//!    per candidate commit pair, all awaited together.
//! 2. One blame per surviving `(hash, path)` — deduplicated before the wave
//!    is issued, so a file referenced by several patches is blamed once.
//!
//! The waves are strictly sequential (wave 2's requests are derived from
//! wave 1's filtered results), but within a wave command order is
//! irrelevant: every result is merged into the aggregate by key after the
//! wave completes, never while commands are in flight. Any single command
//! failure fails the whole build; consistency is preferred over partial
//! results.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use futures::future::try_join_all;

use crate::command::CommandRunner;
use crate::error::GitError;
use crate::parse::{self, LOG_FIELD_SEP};
use crate::types::{Commit, Comparison, FileRecord, Patch};

/// All ordered commit pairs over `hashes`: each hash against every later
/// one, origin always preceding target in the caller's ordering. N hashes
/// yield N*(N-1)/2 pairs.
fn candidate_pairs(hashes: &[String]) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for i in 0..hashes.len() {
        for j in i + 1..hashes.len() {
            pairs.push((hashes[i].as_str(), hashes[j].as_str()));
        }
    }
    pairs
}

/// True if the patch touches a file listed as changed by any hash between
/// `from` and `to` (inclusive) in the caller's ordering. Filters out
/// spurious tree-diff matches from unrelated history and bounds blame work
/// to files actually touched within the requested range.
fn touches_changed_file(
    hashes: &[String],
    changed: &HashMap<String, Vec<String>>,
    from: &str,
    to: &str,
    patch: &Patch,
) -> bool {
    let Some(start) = hashes.iter().position(|h| h == from) else {
        return false;
    };
    let Some(end) = hashes.iter().position(|h| h == to) else {
        return false;
    };

    hashes[start..=end].iter().any(|hash| {
        changed.get(hash).is_some_and(|files| {
            files
                .iter()
                .any(|file| file == &patch.original_path || file == &patch.modified_path)
        })
    })
}

/// Builds the full comparison for `hashes` (oldest first, caller-ordered).
///
/// # Errors
///
/// Returns the first [`GitError`] any plumbing command produced; no partial
/// [`Comparison`] is ever returned. Commands still in flight when one fails
/// run to completion and their output is discarded.
pub async fn build_comparison<R>(
    runner: &R,
    repo_path: &Path,
    hashes: &[String],
) -> Result<Comparison, GitError>
where
    R: CommandRunner + ?Sized,
{
    let mut comparison = Comparison::new(hashes.to_vec());

    let mut show_args: Vec<String> = vec!["show".into(), "--name-only".into()];
    show_args.extend(hashes.iter().cloned());
    show_args.push("--format=%m%H".into());

    let pairs = candidate_pairs(hashes);
    log::debug!("comparing {} hashes across {} pairs", hashes.len(), pairs.len());

    // Wave 1: the changed-files listing and every pairwise tree diff,
    // issued concurrently and awaited together.
    let tree_jobs = pairs.iter().map(|&(from, to)| {
        let args: Vec<String> = vec![
            "diff-tree".into(),
            "--raw".into(),
            "-r".into(),
            "-M".into(),
            format!("{from}..{to}"),
        ];
        async move { runner.run(repo_path, &args).await }
    });
    let (changed_raw, tree_raws) =
        tokio::try_join!(runner.run(repo_path, &show_args), try_join_all(tree_jobs))?;

    let changed_files = parse::parse_changed_files(&changed_raw);

    let mut patches: Vec<(&str, &str, Patch)> = Vec::new();
    for (&(from, to), raw) in pairs.iter().zip(&tree_raws) {
        for patch in parse::parse_diff_tree(raw) {
            if touches_changed_file(hashes, &changed_files, from, to, &patch) {
                patches.push((from, to, patch));
            }
        }
    }

    // Wave 2: blame each (hash, path) at most once, however many patches
    // reference it. Deduplication must happen before the wave is issued.
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut blame_targets: Vec<(String, String)> = Vec::new();
    for (from, to, patch) in &patches {
        if !patch.original_path.is_empty() {
            let key = ((*from).to_owned(), patch.original_path.clone());
            if seen.insert(key.clone()) {
                blame_targets.push(key);
            }
        }
        if !patch.modified_path.is_empty() {
            let key = ((*to).to_owned(), patch.modified_path.clone());
            if seen.insert(key.clone()) {
                blame_targets.push(key);
            }
        }
    }
    log::debug!("{} surviving patches, {} blame targets", patches.len(), blame_targets.len());

    let blame_jobs = blame_targets.iter().map(|(hash, path)| {
        let args: Vec<String> = vec![
            "blame".into(),
            "-s".into(),
            "-l".into(),
            hash.clone(),
            "--".into(),
            path.clone(),
        ];
        async move { runner.run(repo_path, &args).await }
    });
    let blame_raws = try_join_all(blame_jobs).await?;

    for (from, to, patch) in patches {
        comparison.insert_patch(from, to, patch);
    }
    for ((hash, path), raw) in blame_targets.into_iter().zip(blame_raws) {
        let blame = parse::parse_blame(&raw);
        comparison.insert_file(FileRecord {
            hash,
            path,
            blame: blame.annotations,
            content: blame.content,
        });
    }

    Ok(comparison)
}

/// Lists up to `max_count` commits, newest first, optionally starting from
/// `from` instead of HEAD.
///
/// # Errors
///
/// Returns [`GitError`] if the log command fails.
pub async fn list_commits<R>(
    runner: &R,
    repo_path: &Path,
    max_count: usize,
    from: Option<&str>,
) -> Result<Vec<Commit>, GitError>
where
    R: CommandRunner + ?Sized,
{
    let format = format!(
        "--format=%H{sep}%P{sep}%an <%ae>{sep}%aI{sep}%s",
        sep = LOG_FIELD_SEP
    );
    let mut args: Vec<String> = vec!["log".into(), "-n".into(), max_count.to_string(), format];
    if let Some(from) = from {
        args.push(from.to_owned());
    }

    let raw = runner.run(repo_path, &args).await?;
    Ok(parse::parse_log(&raw))
}
