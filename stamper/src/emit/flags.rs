//! Compiler define flags for native code.

use crate::{BuildContext, ComposedVersion, RepoSnapshot};

/// Build the list of `-D` flags describing this build.
///
/// The first seven flags are always present. Flags for the branch name, last
/// change date, uncommitted file count, PD line, and change ID are only added
/// if the value is known. The order never changes so that builds are
/// reproducible.
#[must_use]
pub fn flag_list(
    snapshot: &RepoSnapshot,
    version: &ComposedVersion,
    context: &BuildContext,
) -> Vec<String> {
    let mut flags = vec![
        "-DHAVE_VERSION_INFO".to_owned(),
        quoted("BUILD_TIME", &context.build_time),
        quoted("BUILD_NAME", &context.build_name),
        bare("ANDROID_PLATFORM_SDK_VERSION", &context.sdk_version),
        bare("MAJORV", &snapshot.major_version),
        bare("MINORV", &snapshot.minor_version),
        quoted("ASPLAYER_VERSION", version.as_str()),
    ];

    let optional = [
        ("BRANCH_NAME", &snapshot.branch_name),
        ("LAST_CHANGED", &snapshot.last_change_date),
        ("GIT_UNCOMMIT_FILE_NUM", &snapshot.uncommitted_file_count),
        ("COMMIT_PD", &snapshot.pd_line),
        ("COMMIT_CHANGEID", &snapshot.change_id_line),
    ];
    flags.extend(
        optional
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| quoted(name, value)),
    );

    flags
}

/// `-DNAME=value`
fn bare(name: &str, value: &str) -> String {
    format!("-D{name}={value}")
}

/// `-DNAME="value"`
fn quoted(name: &str, value: &str) -> String {
    format!("-D{name}=\"{value}\"")
}
