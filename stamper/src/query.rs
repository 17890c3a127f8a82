//! Run `git` queries against a source tree.
//!
//! Queries never stop a stamping run. A query that fails is logged and
//! treated as if it produced no output.

use crate::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Everything up to and including the last “Network is unreachable”.
static NETWORK_UNREACHABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(.*)Network is unreachable").expect("pattern should be valid")
});

/// Something that can run `git`.
pub trait Runner {
    /// Run `git` with `args` in `dir`.
    ///
    /// Returns stdout and stderr combined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if `git` couldn’t be started or exited with a
    /// failure status.
    fn git(&self, dir: &Path, args: &[&str]) -> Result<String>;
}

/// Runs the `git` executable found in `PATH`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GitRunner;

impl Runner for GitRunner {
    fn git(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        let output = duct::cmd("git", args.iter().copied())
            .dir(dir)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|error| Error::Query {
                command: command.clone(),
                message: error.to_string(),
            })?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            Ok(text)
        } else {
            Err(Error::Query { command, message: text.trim().to_owned() })
        }
    }
}

/// Run a query, logging and swallowing failures.
///
/// Returns `None` if the query failed.
pub fn query<R: Runner + ?Sized>(
    runner: &R,
    dir: &Path,
    args: &[&str],
    log: &slog::Logger,
) -> Option<String> {
    match runner.git(dir, args) {
        Ok(output) => Some(output),
        Err(error) => {
            slog::warn!(log, "Query failed in {dir:?}: {error}");
            None
        }
    }
}

/// Clean up a value before it’s used in output.
///
/// Removes all newlines, then drops everything up to and including the last
/// “Network is unreachable” so that fetch errors don’t leak into values.
#[must_use]
pub fn scrub(value: &str) -> String {
    let value = value.replace('\n', "");
    NETWORK_UNREACHABLE.replace_all(&value, "").into_owned()
}

/// Collapse runs of whitespace to a single space and trim the ends.
#[must_use]
pub fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
