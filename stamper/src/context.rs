//! Values supplied by the build that invokes the stamper.

use crate::query::scrub;
use std::path::PathBuf;

/// Format for build times.
///
/// This is laid out like the output of `date(1)`, but the zone is a numeric
/// offset such as `+0000` since the local zone name isn’t available.
pub const BUILD_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %z %Y";

/// Information about the build in progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildContext {
    /// The directory the build was started from.
    pub working_dir: PathBuf,

    /// The platform SDK version, e.g. `34`.
    pub sdk_version: String,

    /// Who is running the build.
    pub build_name: String,

    /// When the build started.
    pub build_time: String,
}

impl BuildContext {
    /// Create a context with the build time set to now.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(
        working_dir: P,
        sdk_version: &str,
        build_name: &str,
    ) -> Self {
        let build_time = chrono::Local::now().format(BUILD_TIME_FORMAT);
        Self {
            working_dir: working_dir.into(),
            sdk_version: scrub(sdk_version),
            build_name: scrub(build_name),
            build_time: build_time.to_string(),
        }
    }

    /// Replace the build time.
    #[must_use]
    pub fn with_build_time(self, build_time: &str) -> Self {
        Self { build_time: scrub(build_time), ..self }
    }

    /// Warn if the SDK version isn’t a number.
    ///
    /// The value is used as is either way.
    pub fn check_sdk_version(&self, log: &slog::Logger) {
        match self.sdk_version.parse::<u32>() {
            Ok(version) => slog::info!(log, "Platform SDK version: {version}"),
            Err(error) => slog::warn!(
                log,
                "Platform SDK version {:?} is not a number: {error}",
                self.sdk_version
            ),
        }
    }
}
