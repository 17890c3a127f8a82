//! Parse the version declaration file.
//!
//! The file is a series of `Key=Value` lines, e.g.
//!
//! ```text
//! Major_V=2
//! Minor_V=5
//! BaseChangeId=abcdef1234
//! ```

use crate::query::scrub;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Number of leading characters of `BaseChangeId` that are used.
pub const BASE_CHANGE_ID_LEN: usize = 6;

/// Values from a version declaration file.
///
/// Keys that are missing are left as empty strings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VersionFile {
    /// The `Major_V` value.
    pub major: String,

    /// The `Minor_V` value.
    pub minor: String,

    /// The first [`BASE_CHANGE_ID_LEN`] characters of `BaseChangeId`.
    pub base_change_id: String,
}

impl VersionFile {
    /// Parse the contents of a version file.
    ///
    /// The first line for each key wins.
    ///
    /// # Example
    ///
    /// ```
    /// use assert2::assert;
    /// use version_stamper::VersionFile;
    ///
    /// let version = VersionFile::parse("Major_V=2\nBaseChangeId=abcdef1234\n");
    /// assert!(version.major == "2");
    /// assert!(version.minor == "");
    /// assert!(version.base_change_id == "abcdef");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self {
            major: assignment(input, "Major_V=").unwrap_or_default(),
            minor: assignment(input, "Minor_V=").unwrap_or_default(),
            base_change_id: base_change_id(input).unwrap_or_default(),
        }
    }

    /// Read and parse a version file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file couldn’t be read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .map(|contents| Self::parse(&contents))
            .map_err(|error| Error::io(path, error))
    }
}

/// Find the value of the first line that starts with `key`.
///
/// Leading whitespace is skipped, but `key` must otherwise begin the line. A
/// line such as `Old_Major_V=1` or `# Major_V=1` is not an assignment.
fn assignment(input: &str, key: &str) -> Option<String> {
    input
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(key))
        .map(|value| scrub(value.trim()))
}

/// Find the truncated value of the first `BaseChangeId` line.
///
/// Like `awk -F=`, only the text up to a second `=` counts as the value.
fn base_change_id(input: &str) -> Option<String> {
    input
        .lines()
        .find(|line| line.starts_with("BaseChangeId"))
        .and_then(|line| line.split('=').nth(1))
        .map(|value| value.trim().chars().take(BASE_CHANGE_ID_LEN).collect())
}
