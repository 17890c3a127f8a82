//! Collect version information from a source tree.

use crate::query::{normalize_whitespace, query, scrub};
use crate::{Runner, VersionFile};
use serde::Serialize;
use std::path::Path;

/// Raw version information collected from one source tree.
///
/// Any value that couldn’t be determined is an empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RepoSnapshot {
    /// `Major_V` from the version file.
    pub major_version: String,

    /// `Minor_V` from the version file.
    pub minor_version: String,

    /// Truncated `BaseChangeId` from the version file.
    pub base_change_id: String,

    /// Number of commits since the commit with the base change ID.
    pub commit_count: String,

    /// Abbreviated hash of `HEAD`.
    pub commit_hash: String,

    /// Name of the checked out branch.
    pub branch_name: String,

    /// The `Date:` line of the most recent commit.
    pub last_change_date: String,

    /// The most recent `Change-Id:` line.
    pub change_id_line: String,

    /// The most recent `PD#` line.
    pub pd_line: String,

    /// Number of files with unstaged changes.
    pub uncommitted_file_count: String,
}

/// Reads a version file and queries a git checkout to make a
/// [`RepoSnapshot`].
#[derive(Debug)]
pub struct RepositoryInfoReader<'a, R: Runner + ?Sized> {
    /// Used to run `git`.
    runner: &'a R,

    /// The git working directory.
    source_dir: &'a Path,
}

impl<'a, R: Runner + ?Sized> RepositoryInfoReader<'a, R> {
    /// Create a reader for the git checkout at `source_dir`.
    pub const fn new(runner: &'a R, source_dir: &'a Path) -> Self {
        Self { runner, source_dir }
    }

    /// Collect a snapshot.
    ///
    /// This runs `git log`, `git rev-parse`, `git branch`, and `git diff`, one
    /// after another. Failures are logged and leave the affected values
    /// empty; this never fails outright.
    pub fn read(&self, version_file: &Path, log: &slog::Logger) -> RepoSnapshot {
        let version = VersionFile::read(version_file).unwrap_or_else(|error| {
            slog::warn!(log, "Could not read version file: {error}");
            VersionFile::default()
        });
        slog::debug!(
            log,
            "Version file: major {:?}, minor {:?}, base change {:?}",
            version.major,
            version.minor,
            version.base_change_id
        );
        for (key, value) in [
            ("Major_V", &version.major),
            ("Minor_V", &version.minor),
            ("BaseChangeId", &version.base_change_id),
        ] {
            if value.is_empty() {
                slog::warn!(log, "No {key} in {version_file:?}");
            }
        }

        let mut snapshot = RepoSnapshot {
            major_version: version.major,
            minor_version: version.minor,
            base_change_id: version.base_change_id,
            ..RepoSnapshot::default()
        };

        if let Some(history) = self.query(&["log"], log) {
            snapshot.commit_count =
                commit_count(&history, &snapshot.base_change_id)
                    .map(|count| count.to_string())
                    .unwrap_or_default();
            snapshot.change_id_line = scrub_found(first_line_containing(
                &history,
                "Change-Id",
            ));
            snapshot.pd_line =
                scrub_found(first_line_containing(&history, "PD#"));
            snapshot.last_change_date = scrub_found(date_line(&history));
        }

        if let Some(hash) = self.query(&["rev-parse", "--short", "HEAD"], log) {
            snapshot.commit_hash = scrub(hash.trim());
        }

        if let Some(branches) = self.query(&["branch", "-a"], log) {
            snapshot.branch_name = scrub_found(current_branch(&branches));
        }

        if let Some(diff) = self.query(&["diff"], log) {
            snapshot.uncommitted_file_count = uncommitted_file_count(&diff)
                .map(|count| count.to_string())
                .unwrap_or_default();
        }

        slog::debug!(log, "Collected {snapshot:?}");
        snapshot
    }

    /// Run a `git` query in the source directory.
    fn query(&self, args: &[&str], log: &slog::Logger) -> Option<String> {
        query(self.runner, self.source_dir, args, log)
    }
}

/// Scrub a value if it was found, otherwise return an empty string.
fn scrub_found(value: Option<String>) -> String {
    value.map(|value| scrub(&value)).unwrap_or_default()
}

/// Count the commits made since the commit with `base_change_id`.
///
/// `history` is the output of `git log`. This finds the first `Change-Id: `
/// line that contains `base_change_id` and returns how many `Change-Id: `
/// lines came before it.
///
/// Returns `None` if `base_change_id` is empty or isn’t found.
///
/// # Example
///
/// ```
/// use assert2::assert;
/// use version_stamper::snapshot::commit_count;
///
/// let history = "    Change-Id: Iaaaaaa\n    Change-Id: Iabcdef\n";
/// assert!(commit_count(history, "abcdef") == Some(1));
/// assert!(commit_count(history, "fedcba") == None);
/// ```
#[must_use]
pub fn commit_count(history: &str, base_change_id: &str) -> Option<usize> {
    if base_change_id.is_empty() {
        return None;
    }

    history
        .lines()
        .filter(|line| line.contains("Change-Id: "))
        .position(|line| line.contains(base_change_id))
}

/// Find the first line containing `needle` with whitespace normalized.
#[must_use]
pub fn first_line_containing(text: &str, needle: &str) -> Option<String> {
    text.lines()
        .find(|line| line.contains(needle))
        .map(normalize_whitespace)
}

/// Find the first `Date:` header line in `git log` output.
#[must_use]
pub fn date_line(history: &str) -> Option<String> {
    history
        .lines()
        .find(|line| line.trim_start().starts_with("Date:"))
        .map(normalize_whitespace)
}

/// Find the checked out branch in `git branch -a` output.
///
/// This is the first line marked with `*`, with whitespace normalized. The
/// leading `* ` marker is dropped, so the value is `main` rather than the
/// `* main` that `git branch` prints. A detached `HEAD` comes out as
/// something like `(HEAD detached at 1a2b3c4)`.
#[must_use]
pub fn current_branch(branches: &str) -> Option<String> {
    branches
        .lines()
        .find(|line| line.contains('*'))
        .map(|line| {
            let line = normalize_whitespace(line);
            match line.strip_prefix("* ") {
                Some(name) => name.to_owned(),
                None => line,
            }
        })
        .filter(|name| !name.is_empty())
}

/// Count the files changed in `git diff` output.
///
/// Returns `None` if nothing changed.
#[must_use]
pub fn uncommitted_file_count(diff: &str) -> Option<usize> {
    let count = diff.lines().filter(|line| line.contains("+++")).count();
    (count > 0).then_some(count)
}
