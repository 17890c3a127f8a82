//! Build the version string.

use crate::RepoSnapshot;
use serde::Serialize;
use std::fmt;

/// A version string like `V2.5.41-ga1b2c3d`.
///
/// Missing values are left as empty segments rather than filled in, so an
/// incomplete version like `V2.5.-ga1b2c3d` shows that the build didn’t have
/// full repository information.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComposedVersion(String);

impl ComposedVersion {
    /// Compose the version for a snapshot.
    ///
    /// # Example
    ///
    /// ```
    /// use assert2::assert;
    /// use version_stamper::{ComposedVersion, RepoSnapshot};
    ///
    /// let snapshot = RepoSnapshot {
    ///     major_version: "2".to_owned(),
    ///     minor_version: "5".to_owned(),
    ///     commit_count: "41".to_owned(),
    ///     commit_hash: "a1b2c3d".to_owned(),
    ///     ..RepoSnapshot::default()
    /// };
    /// assert!(ComposedVersion::compose(&snapshot).as_str() == "V2.5.41-ga1b2c3d");
    /// ```
    #[must_use]
    pub fn compose(snapshot: &RepoSnapshot) -> Self {
        Self(format!(
            "V{}.{}.{}-g{}",
            snapshot.major_version,
            snapshot.minor_version,
            snapshot.commit_count,
            snapshot.commit_hash,
        ))
    }

    /// Get the version as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
