//! Errors encountered while stamping version information.

use std::path::PathBuf;
use std::result;

/// `Result` type for `Error`.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors encountered while stamping version information.
///
/// None of these are fatal to a stamping run; [`crate::VersionStamper`]
/// logs them and carries on with whatever it has.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error reading or writing a file.
    #[error("{path:?}: {source}")]
    Io {
        /// The file that was being accessed.
        path: PathBuf,

        /// The underlying error.
        source: std::io::Error,
    },

    /// An error copying a file.
    #[error("copying {from:?} to {to:?}: {source}")]
    Copy {
        /// The file being copied.
        from: PathBuf,

        /// Where it was being copied to.
        to: PathBuf,

        /// The underlying error.
        source: std::io::Error,
    },

    /// An error building a field substitution pattern.
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// An error encountered parsing the TOML configuration.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// A query could not be started or exited unsuccessfully.
    #[error("`{command}` failed: {message}")]
    Query {
        /// The command line that was run.
        command: String,

        /// What went wrong, usually the command’s own output.
        message: String,
    },
}

impl Error {
    /// Wrap an IO error with the path it concerns.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
