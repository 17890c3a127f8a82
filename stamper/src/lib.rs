//! Stamp version information from a git checkout into build outputs.
//!
//! A stamping run reads a version declaration file and queries the source
//! tree’s git repository ([`RepositoryInfoReader`]), combines the results into
//! a version string ([`ComposedVersion`]), and then either rewrites fields in
//! a source template ([`emit::template`]) or produces compiler define flags
//! ([`emit::flags`]).
//!
//! Every step is fail-open: a missing repository, a missing file, or a failed
//! query leaves the affected values empty instead of stopping the build.

pub mod compose;
pub use compose::*;

pub mod config;
pub use config::*;

pub mod context;
pub use context::*;

pub mod emit;

mod errors;
pub use errors::*;

pub mod query;
pub use query::{GitRunner, Runner};

pub mod snapshot;
pub use snapshot::*;

pub mod stamper;
pub use stamper::*;

pub mod version_file;
pub use version_file::*;

#[cfg(test)]
pub mod test;
