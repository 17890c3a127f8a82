//! Code to deal with executable parameters.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

pub use clap::Parser;

/// Stamp git version information into build outputs
#[derive(Debug, clap::Parser)]
#[clap(version, about)]
pub struct Params {
    /// Whether or not to output in color
    #[clap(long, default_value = "auto", value_name = "WHEN", global = true)]
    pub color: ColorChoice,

    /// Verbosity (may be repeated up to three times)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory the build was started from
    #[arg(long, env = "PWD", value_name = "DIR", global = true)]
    pub pwd: Option<PathBuf>,

    /// Git checkout to read, relative to the build directory
    #[arg(long, value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,

    /// Platform SDK version
    #[arg(long, env = "PLATFORM_SDK_VERSION", global = true)]
    pub sdk_version: Option<String>,

    /// Who is running the build
    #[arg(long, env = "LOGNAME", global = true)]
    pub build_name: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Generate the Java build configuration class from its template
    Java,
    /// Print compiler define flags, one per line
    Cflags,
    /// Print the composed version string
    Describe,
    /// Print all collected version information as JSON
    Snapshot,
    /// Print a human readable version report
    Summary,
    /// Print the version of this tool
    Version,
}

impl Params {
    /// Print a warning message in error color to `err_stream()`.
    pub fn warn<S: AsRef<str>>(&self, message: S) -> io::Result<()> {
        let mut err_out = self.err_stream();
        err_out.set_color(&error_color())?;
        err_out.write_all(message.as_ref().as_bytes())?;
        err_out.reset()?;

        Ok(())
    }

    /// Get stream to use for errors.
    pub fn err_stream(&self) -> StandardStream {
        StandardStream::stderr(self.color_choice(&io::stderr()))
    }

    /// Whether or not to output on a stream in color.
    ///
    /// Checks if passed stream is a terminal.
    pub fn color_choice<T: IsTerminal>(
        &self,
        stream: &T,
    ) -> termcolor::ColorChoice {
        if self.color == ColorChoice::Auto && !stream.is_terminal() {
            termcolor::ColorChoice::Never
        } else {
            self.color.into()
        }
    }
}

/// Whether or not to output in color
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Output in color when running in a terminal that supports it
    #[default]
    Auto,

    /// Always output in color
    Always,

    /// Never output in color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Returns color used to output errors.
pub fn error_color() -> ColorSpec {
    let mut color = ColorSpec::new();
    color.set_fg(Some(Color::Red));
    color.set_intense(true);
    color
}
