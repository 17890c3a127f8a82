//! Human readable version report.

use crate::{BuildContext, ComposedVersion, RepoSnapshot};
use std::fmt::Write;

/// Separator above and below the report.
const RULE: &str = "------------------------------------";

/// Render the version report the player library logs when it starts.
///
/// Unknown values are shown as empty.
#[must_use]
pub fn summary(
    snapshot: &RepoSnapshot,
    version: &ComposedVersion,
    context: &BuildContext,
) -> String {
    let rows = [
        ("branch name:", snapshot.branch_name.as_str()),
        ("", snapshot.change_id_line.as_str()),
        ("ID:", snapshot.pd_line.as_str()),
        ("last changed:", snapshot.last_change_date.as_str()),
        ("build-time:", context.build_time.as_str()),
        ("build-name:", context.build_name.as_str()),
        ("uncommitted-file-num:", snapshot.uncommitted_file_count.as_str()),
        ("version:", version.as_str()),
    ];

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    for (label, value) in rows {
        if label.is_empty() {
            // The change ID line carries its own label.
            let _ = writeln!(out, "{value}");
        } else {
            let _ = writeln!(out, "{label:<22}{value}");
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out
}
