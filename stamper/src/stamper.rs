//! Run the whole stamping pipeline.

use crate::emit::{self, FieldValue, TemplateEmitter};
use crate::{
    BuildContext, ComposedVersion, Config, RepoSnapshot, RepositoryInfoReader,
    Runner,
};
use serde::Serialize;

/// Collects version information for a build.
///
/// This is what a build system calls when it configures a module. The
/// returned [`Stamp`] is then used to produce whichever outputs the module
/// needs.
#[derive(Clone, Copy, Debug)]
pub struct VersionStamper<'a> {
    /// Paths and field names.
    config: &'a Config,

    /// Values from the build system.
    context: &'a BuildContext,
}

impl<'a> VersionStamper<'a> {
    /// Create a stamper.
    #[must_use]
    pub const fn new(config: &'a Config, context: &'a BuildContext) -> Self {
        Self { config, context }
    }

    /// Read the repository and compose the version.
    ///
    /// This always succeeds. Anything that couldn’t be determined is logged
    /// and left empty.
    pub fn run<R: Runner + ?Sized>(
        &self,
        runner: &R,
        log: &slog::Logger,
    ) -> Stamp<'a> {
        self.context.check_sdk_version(log);

        let working_dir = &self.context.working_dir;
        let source_dir = self.config.source_dir(working_dir);
        let version_file = self.config.version_file(working_dir);
        slog::info!(log, "Reading version information from {source_dir:?}");

        let snapshot = RepositoryInfoReader::new(runner, &source_dir)
            .read(&version_file, log);
        let version = ComposedVersion::compose(&snapshot);
        slog::info!(log, "Version: {version}");

        Stamp {
            snapshot,
            version,
            config: self.config,
            context: self.context,
        }
    }
}

/// The result of a stamping run.
#[derive(Clone, Debug, Serialize)]
pub struct Stamp<'a> {
    /// Raw values from the repository.
    pub snapshot: RepoSnapshot,

    /// The composed version string.
    pub version: ComposedVersion,

    /// Paths and field names.
    #[serde(skip)]
    config: &'a Config,

    /// Values from the build system.
    #[serde(skip)]
    context: &'a BuildContext,
}

impl Stamp<'_> {
    /// Compiler define flags for native code.
    #[must_use]
    pub fn flags(&self, log: &slog::Logger) -> Vec<String> {
        let flags = emit::flag_list(&self.snapshot, &self.version, self.context);
        for flag in &flags {
            slog::info!(log, "Flag: {flag}");
        }
        flags
    }

    /// The template fields and their new values.
    #[must_use]
    pub fn template_fields(&self) -> Vec<FieldValue<'_>> {
        let names = &self.config.fields;
        let snapshot = &self.snapshot;
        vec![
            FieldValue::Str(&names.branch_name, &snapshot.branch_name),
            FieldValue::Str(&names.commit_change_id, &snapshot.change_id_line),
            FieldValue::Str(&names.commit_pd, &snapshot.pd_line),
            FieldValue::Str(&names.last_changed, &snapshot.last_change_date),
            FieldValue::Str(&names.build_time, &self.context.build_time),
            FieldValue::Str(&names.build_name, &self.context.build_name),
            FieldValue::Str(&names.version_name, self.version.as_str()),
            FieldValue::Str(
                &names.uncommitted_file_num,
                &snapshot.uncommitted_file_count,
            ),
            FieldValue::Bool(&names.have_version_info, true),
        ]
    }

    /// Write the generated Java class from its template.
    ///
    /// Returns `false` if it couldn’t be written. The error is logged; it is
    /// not fatal to the build.
    pub fn write_template(&self, log: &slog::Logger) -> bool {
        let working_dir = &self.context.working_dir;
        let template = self.config.template(working_dir);
        let destination = self.config.destination(working_dir);

        match TemplateEmitter::new(&template, &destination)
            .emit(&self.template_fields(), log)
        {
            Ok(()) => {
                slog::info!(log, "Wrote {destination:?}");
                true
            }
            Err(error) => {
                slog::warn!(log, "Could not write {destination:?}: {error}");
                false
            }
        }
    }

    /// The human readable version report.
    #[must_use]
    pub fn summary(&self) -> String {
        emit::summary(&self.snapshot, &self.version, self.context)
    }
}
