//! Parsers for the plumbing output formats the orchestrator consumes.
//!
//! All four parsers are pure text → records and format-first: they split on
//! the delimiters the plumbing commands promise and validate as little as
//! possible beyond that. Malformed input is logged at warn level and
//! skipped — plumbing output is assumed mostly well-formed, but a single bad
//! line must never sink a whole comparison.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use crate::types::{Commit, Patch, PatchStatus};

/// Splits one blame line on the line-number marker: a space, one or more
/// digits, `)`, and at most one following space, e.g. `" 17) "`. Content
/// keeps any further whitespace (tab-indented lines stay intact).
static BLAME_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \d+\) ?").expect("blame marker pattern is valid"));

/// Field separator for the log record format (ASCII unit separator — cannot
/// appear in author names or subject lines).
pub(crate) const LOG_FIELD_SEP: char = '\u{1f}';

/// Parses `show --name-only <hashes…> --format=%m%H` output into a map from
/// commit hash to the paths that commit changed.
///
/// The `%m` relation marker makes every commit block start with a literal
/// `>`, so blocks are split on that character. The first non-empty line of a
/// block is the hash, the rest are paths. A commit with no changed paths
/// still gets an (empty) entry; blocks without a hash line are skipped.
pub fn parse_changed_files(raw: &str) -> HashMap<String, Vec<String>> {
    let mut files_by_hash = HashMap::new();

    for block in raw.split('>') {
        let mut lines = block.lines().filter(|line| !line.is_empty());
        let Some(hash) = lines.next() else {
            continue;
        };
        files_by_hash.insert(hash.to_owned(), lines.map(str::to_owned).collect());
    }

    files_by_hash
}

/// Parses `diff-tree --raw -r -M` output into patches.
///
/// Each line looks like
/// `:100644 100644 <old-blob> <new-blob> <status>[<score>] <path> [<new-path>]`
/// and is tokenized by whitespace. The status is the first character of the
/// fifth token; path assignment depends on it (Copied/Renamed carry two
/// paths, Added/Deleted one side only, everything else the same path twice).
pub fn parse_diff_tree(raw: &str) -> Vec<Patch> {
    let mut patches = Vec::new();

    for line in raw.lines().filter(|line| !line.is_empty()) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (Some(status_token), Some(path)) = (parts.get(4), parts.get(5)) else {
            log::warn!("skipping malformed tree-diff line: {line:?}");
            continue;
        };

        let status = match status_token.chars().next() {
            Some('A') => PatchStatus::Added,
            Some('C') => PatchStatus::Copied,
            Some('D') => PatchStatus::Deleted,
            Some('M') => PatchStatus::Modified,
            Some('R') => PatchStatus::Renamed,
            Some('U') => PatchStatus::Unmerged,
            Some('T') => PatchStatus::TypeChanged,
            Some('X') => PatchStatus::Unknown,
            Some('B') => PatchStatus::Broken,
            other => {
                log::warn!("unknown diff status {other:?} on line {line:?}");
                PatchStatus::Unknown
            }
        };

        let (original_path, modified_path) = match status {
            PatchStatus::Copied | PatchStatus::Renamed => {
                let Some(new_path) = parts.get(6) else {
                    log::warn!("tree-diff {status:?} line without a second path: {line:?}");
                    continue;
                };
                ((*path).to_owned(), (*new_path).to_owned())
            }
            PatchStatus::Added => (String::new(), (*path).to_owned()),
            PatchStatus::Deleted => ((*path).to_owned(), String::new()),
            _ => ((*path).to_owned(), (*path).to_owned()),
        };

        patches.push(Patch { status, original_path, modified_path });
    }

    patches
}

/// One parsed blame listing: per-line attributions plus the reconstructed
/// file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blame {
    /// One attribution string per source line, input order preserved.
    pub annotations: Vec<String>,
    /// The source lines rejoined with `\n`.
    pub content: String,
}

/// Parses `blame -s -l <hash> -- <path>` output.
///
/// A line looks like `<attribution> <n>)<tab-or-space><content>`; the first
/// match of [`BLAME_MARKER`] splits it. The attribution drops its leading
/// character (the boundary-commit `^` prefix slot), matching what the
/// attribution column actually displays. Lines without the marker are
/// dropped.
pub fn parse_blame(raw: &str) -> Blame {
    let mut annotations = Vec::new();
    let mut content_lines = Vec::new();

    for line in raw.lines().filter(|line| !line.is_empty()) {
        let Some(marker) = BLAME_MARKER.find(line) else {
            log::warn!("dropping unrecognized blame line: {line:?}");
            continue;
        };
        annotations.push(line.get(1..marker.start()).unwrap_or_default().to_owned());
        content_lines.push(&line[marker.end()..]);
    }

    Blame { annotations, content: content_lines.join("\n") }
}

/// Parses history records produced with the [`LOG_FIELD_SEP`]-delimited
/// format (`%H`, `%P`, `%an <%ae>`, `%aI`, `%s`), one record per line.
pub fn parse_log(raw: &str) -> Vec<Commit> {
    let mut commits = Vec::new();

    for line in raw.lines().filter(|line| !line.is_empty()) {
        let fields: Vec<&str> = line.split(LOG_FIELD_SEP).collect();
        let [hash, parents, author, date, subject] = fields[..] else {
            log::warn!("skipping malformed log record: {line:?}");
            continue;
        };
        let date = match DateTime::parse_from_rfc3339(date) {
            Ok(date) => date,
            Err(err) => {
                log::warn!("skipping log record with unparseable date {date:?}: {err}");
                continue;
            }
        };
        commits.push(Commit {
            hash: hash.to_owned(),
            parent_hash: parents
                .split(' ')
                .next()
                .filter(|p| !p.is_empty())
                .map(str::to_owned),
            author: author.to_owned(),
            date,
            message: subject.to_owned(),
        });
    }

    commits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn changed_files_groups_paths_under_their_commit() {
        let raw = ">aaa111\nsrc/a.ts\nsrc/b.ts\n>bbb222\n\n>ccc333\nREADME.md\n";
        let changed = parse_changed_files(raw);
        assert_eq!(changed.len(), 3);
        assert_eq!(changed["aaa111"], vec!["src/a.ts", "src/b.ts"]);
        assert_eq!(changed["bbb222"], Vec::<String>::new());
        assert_eq!(changed["ccc333"], vec!["README.md"]);
    }

    #[test]
    fn changed_files_skips_blocks_without_a_hash() {
        let changed = parse_changed_files(">\n>\n>aaa\nf.txt\n");
        assert_eq!(changed.len(), 1);
        assert_eq!(changed["aaa"], vec!["f.txt"]);
    }

    #[test]
    fn diff_tree_maps_status_letters_to_paths() {
        let raw = "\
:000000 100644 0000000 1234567 A\tjest.config.js
:100644 000000 1234567 0000000 D\t__tests__/core.spec.tsx
:100644 100644 bcd1234 0123456 M\tpackage.json
:100644 100644 abcd123 1234567 R86\tfile1\tfile3
:100644 100644 abcd123 1234567 C68\tfile1\tfile2
";
        let patches = parse_diff_tree(raw);
        assert_eq!(
            patches,
            vec![
                Patch {
                    status: PatchStatus::Added,
                    original_path: "".into(),
                    modified_path: "jest.config.js".into(),
                },
                Patch {
                    status: PatchStatus::Deleted,
                    original_path: "__tests__/core.spec.tsx".into(),
                    modified_path: "".into(),
                },
                Patch {
                    status: PatchStatus::Modified,
                    original_path: "package.json".into(),
                    modified_path: "package.json".into(),
                },
                Patch {
                    status: PatchStatus::Renamed,
                    original_path: "file1".into(),
                    modified_path: "file3".into(),
                },
                Patch {
                    status: PatchStatus::Copied,
                    original_path: "file1".into(),
                    modified_path: "file2".into(),
                },
            ]
        );
    }

    #[test]
    fn diff_tree_maps_unrecognized_letters_to_unknown() {
        let patches = parse_diff_tree(":100644 100644 aaa bbb Z\tmystery.txt\n");
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].status, PatchStatus::Unknown);
        assert_eq!(patches[0].original_path, "mystery.txt");
        assert_eq!(patches[0].modified_path, "mystery.txt");
    }

    #[test]
    fn diff_tree_skips_truncated_lines() {
        let patches = parse_diff_tree(":100644 100644 aaa\nnot a diff line\n");
        assert!(patches.is_empty());
    }

    #[test]
    fn blame_splits_attribution_from_content() {
        let raw = "\
^66535fce3bb71adf27e7c034316c8f63ac52593 17)\t\tborderLeft: '5px solid',
41d7a9352894eebc1dcd29d0e1a1b33cbe49cab8 18) plain content
noise without a marker
9282f13dba15b8a83a4499f5d9e35b084d2e5c71 19)
";
        let blame = parse_blame(raw);
        assert_eq!(
            blame.annotations,
            vec![
                "66535fce3bb71adf27e7c034316c8f63ac52593",
                "1d7a9352894eebc1dcd29d0e1a1b33cbe49cab8",
                "282f13dba15b8a83a4499f5d9e35b084d2e5c71",
            ]
        );
        assert_eq!(blame.content, "\t\tborderLeft: '5px solid',\nplain content\n");
    }

    #[test]
    fn blame_of_empty_output_is_empty() {
        let blame = parse_blame("");
        assert!(blame.annotations.is_empty());
        assert_eq!(blame.content, "");
    }

    #[test]
    fn log_records_parse_into_commits() {
        let sep = LOG_FIELD_SEP;
        let raw = format!(
            "bbb{sep}aaa{sep}Ada <ada@example.com>{sep}2026-08-04T10:00:00+02:00{sep}second\n\
             aaa{sep}{sep}Ada <ada@example.com>{sep}2026-08-03T09:00:00+02:00{sep}first\n"
        );
        let commits = parse_log(&raw);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "bbb");
        assert_eq!(commits[0].parent_hash.as_deref(), Some("aaa"));
        assert_eq!(commits[0].author, "Ada <ada@example.com>");
        assert_eq!(commits[0].message, "second");
        assert_eq!(commits[1].parent_hash, None);
    }

    #[test]
    fn log_records_with_bad_dates_are_skipped() {
        let sep = LOG_FIELD_SEP;
        let raw = format!("aaa{sep}{sep}A <a@b>{sep}yesterday{sep}subject\n");
        assert!(parse_log(&raw).is_empty());
    }
}
