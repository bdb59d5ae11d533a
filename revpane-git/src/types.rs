//! Owned data types for the comparison aggregate.
//!
//! Everything here is fully owned and serde-derived: a Comparison crosses a
//! process boundary on its way to whatever shell renders it, so no type may
//! borrow from the plumbing output it was parsed out of.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// File-level change kind between two commits, as reported by the raw tree
/// diff status letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatchStatus {
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    Unmerged,
    TypeChanged,
    Unknown,
    Broken,
}

/// One file's change descriptor between an origin and a target commit.
///
/// `original_path` is empty for [`PatchStatus::Added`], `modified_path` is
/// empty for [`PatchStatus::Deleted`]; for [`PatchStatus::Copied`] and
/// [`PatchStatus::Renamed`] both are set and may differ. For every other
/// status the two paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub status: PatchStatus,
    pub original_path: String,
    pub modified_path: String,
}

/// The patches recorded between one ordered pair of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub from: String,
    pub to: String,
    pub patches: Vec<Patch>,
}

/// One file captured at one commit: per-line blame attributions plus the
/// reconstructed content (newline-joined).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub hash: String,
    pub path: String,
    /// One attribution string per source line, in file order.
    pub blame: Vec<String>,
    pub content: String,
}

/// The files captured for one commit hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitFiles {
    /// Paths in the order their blame results were recorded.
    pub all_files: Vec<String>,
    pub by_file: HashMap<String, FileRecord>,
}

/// One commit from the history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    /// First parent, absent for a root commit.
    pub parent_hash: Option<String>,
    /// Rendered as `Name <email>`.
    pub author: String,
    pub date: DateTime<FixedOffset>,
    /// Subject line only.
    pub message: String,
}

/// The full result of comparing an ordered set of commit hashes.
///
/// This is the single owning aggregate for a review session. Patches and
/// file records are immutable once inserted; when the hash set changes the
/// whole Comparison is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// The requested hashes, oldest first, exactly as the caller ordered
    /// them. Ancestry is never re-derived from the repository.
    pub all_hashes: Vec<String>,
    /// Patches keyed by origin hash, then target hash. Populated only for
    /// pairs that were actually diffed and survived filtering.
    pub diffs_by_hash: HashMap<String, HashMap<String, Diff>>,
    /// Blamed files keyed by the hash they were captured at.
    pub files_by_hash: HashMap<String, CommitFiles>,
}

impl Comparison {
    /// Creates an empty comparison for `all_hashes`, with empty diff and
    /// file slots pre-seeded for every requested hash.
    pub fn new(all_hashes: Vec<String>) -> Self {
        let diffs_by_hash =
            all_hashes.iter().map(|h| (h.clone(), HashMap::new())).collect();
        let files_by_hash =
            all_hashes.iter().map(|h| (h.clone(), CommitFiles::default())).collect();
        Self { all_hashes, diffs_by_hash, files_by_hash }
    }

    /// Appends `patch` under the `(from, to)` slot, creating the slot on
    /// first use and never overwriting existing entries.
    pub fn insert_patch(&mut self, from: &str, to: &str, patch: Patch) {
        self.diffs_by_hash
            .entry(from.to_owned())
            .or_default()
            .entry(to.to_owned())
            .or_insert_with(|| Diff {
                from: from.to_owned(),
                to: to.to_owned(),
                patches: Vec::new(),
            })
            .patches
            .push(patch);
    }

    /// Records a blamed file, appending its path to the owning hash's list.
    pub fn insert_file(&mut self, record: FileRecord) {
        let slot = self.files_by_hash.entry(record.hash.clone()).or_default();
        slot.all_files.push(record.path.clone());
        slot.by_file.insert(record.path.clone(), record);
    }

    /// The patches recorded between two hashes, if that pair was diffed.
    pub fn diff(&self, from: &str, to: &str) -> Option<&Diff> {
        self.diffs_by_hash.get(from)?.get(to)
    }

    /// The file record captured for `path` at `hash`, if one exists.
    ///
    /// A missing record is an explicit `None`, never a silently empty value;
    /// callers decide whether absence means "nothing to show" or a bug.
    pub fn file(&self, hash: &str, path: &str) -> Option<&FileRecord> {
        self.files_by_hash.get(hash)?.by_file.get(path)
    }

    /// First and last hash of the request — the default pair a shell opens.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((self.all_hashes.first()?.as_str(), self.all_hashes.last()?.as_str()))
    }
}
