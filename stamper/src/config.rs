//! Stamper configuration.
//!
//! Paths default to the ASPlayer source layout. Relative paths are resolved
//! against the build’s working directory (`source_dir`) or against
//! `source_dir` (everything else).

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The git checkout to stamp from.
    pub source_dir: PathBuf,

    /// The version declaration file.
    pub version_file: PathBuf,

    /// The template for the generated Java class.
    pub template: PathBuf,

    /// Where the generated Java class is written.
    pub destination: PathBuf,

    /// Names of the fields to rewrite in the template.
    pub fields: FieldNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: "vendor/amlogic/common/ASPlayer".into(),
            version_file: "version/VERSION".into(),
            template: "libs/ASPlayer-library/BuildConfiguration.java.in".into(),
            destination: "libs/ASPlayer-library/src/main/java/com/amlogic/\
                asplayer/BuildConfiguration.java"
                .into(),
            fields: FieldNames::default(),
        }
    }
}

impl Config {
    /// Parse a TOML configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use assert2::assert;
    /// use version_stamper::Config;
    /// use std::path::PathBuf;
    ///
    /// let config = Config::parse(
    ///     r#"
    ///     source_dir = "/src/player"
    ///
    ///     [fields]
    ///     version_name = "VERSION"
    ///     "#,
    /// )
    /// .unwrap();
    /// assert!(config.source_dir == PathBuf::from("/src/player"));
    /// assert!(config.fields.version_name == "VERSION");
    /// assert!(config.fields.branch_name == "BRANCH_NAME");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if it can’t parse the configuration.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can’t be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input =
            fs::read_to_string(path).map_err(|error| Error::io(path, error))?;
        Self::parse(&input)
    }

    /// The git checkout, resolved against `working_dir`.
    #[must_use]
    pub fn source_dir(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.source_dir)
    }

    /// The version declaration file.
    #[must_use]
    pub fn version_file(&self, working_dir: &Path) -> PathBuf {
        self.source_dir(working_dir).join(&self.version_file)
    }

    /// The template for the generated Java class.
    #[must_use]
    pub fn template(&self, working_dir: &Path) -> PathBuf {
        self.source_dir(working_dir).join(&self.template)
    }

    /// Where the generated Java class is written.
    #[must_use]
    pub fn destination(&self, working_dir: &Path) -> PathBuf {
        self.source_dir(working_dir).join(&self.destination)
    }
}

/// Names of the fields in the Java template.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldNames {
    /// Branch name.
    pub branch_name: String,
    /// Most recent `Change-Id:` line.
    pub commit_change_id: String,
    /// Most recent `PD#` line.
    pub commit_pd: String,
    /// Date of the most recent commit.
    pub last_changed: String,
    /// Build time.
    pub build_time: String,
    /// Who ran the build.
    pub build_name: String,
    /// The composed version.
    pub version_name: String,
    /// Number of files with unstaged changes.
    pub uncommitted_file_num: String,
    /// Boolean set to `true` when the template has been stamped.
    pub have_version_info: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            branch_name: "BRANCH_NAME".to_owned(),
            commit_change_id: "COMMIT_CHANGE_ID".to_owned(),
            commit_pd: "COMMIT_PD".to_owned(),
            last_changed: "LAST_CHANGED".to_owned(),
            build_time: "BUILD_TIME".to_owned(),
            build_name: "BUILD_NAME".to_owned(),
            version_name: "VERSION_NAME".to_owned(),
            uncommitted_file_num: "GIT_UN_COMMIT_FILE_NUM".to_owned(),
            have_version_info: "HAVE_VERSION_INFO".to_owned(),
        }
    }
}
