//! Rewrite field assignments in a copy of a source template.
//!
//! Fields are found by line pattern, not by parsing the source. A line is
//! rewritten if it contains the field name followed somewhere by `=` and then
//! `;`. That means a field name that appears inside another field name will
//! rewrite both lines.

use crate::{Error, Result};
use regex::{NoExpand, Regex, escape};
use std::fs;
use std::path::Path;

/// A new value for a field in the template.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldValue<'a> {
    /// A `String` field. Rewritten as `NAME = "value";`.
    Str(&'a str, &'a str),

    /// A `boolean` field. Rewritten as `NAME = true;` or `NAME = false;`.
    Bool(&'a str, bool),
}

impl FieldValue<'_> {
    /// The name of the field.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Str(name, _) | Self::Bool(name, _) => *name,
        }
    }

    /// Whether there’s nothing to write.
    ///
    /// Empty fields are left at their template defaults.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Str(_, value) => value.is_empty(),
            Self::Bool(..) => false,
        }
    }

    /// The literal to put on the right hand side of the assignment.
    fn literal(&self) -> String {
        match self {
            Self::Str(_, value) => format!("\"{value}\""),
            Self::Bool(_, value) => value.to_string(),
        }
    }
}

/// Copies a template to a destination and rewrites fields in the copy.
#[derive(Clone, Copy, Debug)]
pub struct TemplateEmitter<'a> {
    /// The template file.
    template: &'a Path,

    /// The generated file. Overwritten on every run.
    destination: &'a Path,
}

impl<'a> TemplateEmitter<'a> {
    /// Create an emitter.
    #[must_use]
    pub const fn new(template: &'a Path, destination: &'a Path) -> Self {
        Self { template, destination }
    }

    /// Copy the template and rewrite `fields` in the copy.
    ///
    /// Empty fields are skipped. Running this twice with the same `fields`
    /// produces the same file both times.
    ///
    /// # Errors
    ///
    /// Returns an error if the template couldn’t be copied or the copy
    /// couldn’t be read or written. Nothing is cleaned up, so the destination
    /// may be left as an unmodified copy of the template.
    pub fn emit(&self, fields: &[FieldValue<'_>], log: &slog::Logger) -> Result<()> {
        fs::copy(self.template, self.destination).map_err(|source| {
            Error::Copy {
                from: self.template.to_owned(),
                to: self.destination.to_owned(),
                source,
            }
        })?;
        slog::debug!(
            log,
            "Copied {:?} to {:?}",
            self.template,
            self.destination
        );

        let mut contents = fs::read_to_string(self.destination)
            .map_err(|error| Error::io(self.destination, error))?;

        for field in fields {
            if field.is_empty() {
                slog::debug!(log, "Leaving {} at its default", field.name());
                continue;
            }

            contents = substitute(&contents, field)?;
            slog::info!(
                log,
                "Set {} = {} in {:?}",
                field.name(),
                field.literal(),
                self.destination
            );
        }

        fs::write(self.destination, contents)
            .map_err(|error| Error::io(self.destination, error))
    }
}

/// Rewrite every assignment to `field` in `contents`.
///
/// # Example
///
/// ```
/// use assert2::assert;
/// use version_stamper::emit::{FieldValue, template::substitute};
///
/// let source = "    public static final String BRANCH_NAME = \"\";\n";
/// assert!(
///     substitute(source, &FieldValue::Str("BRANCH_NAME", "main")).unwrap()
///         == "    public static final String BRANCH_NAME = \"main\";\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the field name makes a pattern that is too large.
pub fn substitute(contents: &str, field: &FieldValue<'_>) -> Result<String> {
    let name = field.name();
    let pattern = Regex::new(&format!("{}(.*)=(.*);", escape(name)))?;
    let replacement = format!("{name} = {};", field.literal());
    Ok(pattern
        .replace_all(contents, NoExpand(&replacement))
        .into_owned())
}
