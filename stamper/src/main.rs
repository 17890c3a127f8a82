//! version-stamper executable.

use std::path::PathBuf;
use std::process::ExitCode;
use version_stamper::{BuildContext, Config, GitRunner, Stamp, VersionStamper};

mod logging;
mod params;

use params::{Command, Params, Parser};

/// Wrapper to handle errors.
///
/// See [`cli()`].
fn main() -> ExitCode {
    let params = Params::parse();
    cli(&params).unwrap_or_else(|error| {
        let error = format!("{error}\n");
        if error.to_lowercase().starts_with("error") {
            params.warn(error).unwrap();
        } else {
            params.warn(format!("Error: {error}")).unwrap();
        }

        ExitCode::FAILURE
    })
}

/// Do the actual work.
///
/// Returns the exit code to use. Problems with the repository or the output
/// files are logged and don’t cause a failure; only problems with the
/// parameters or configuration file do.
///
/// # Errors
///
/// This returns any errors encountered during the run so that they can be
/// outputted nicely in [`main()`].
fn cli(params: &Params) -> anyhow::Result<ExitCode> {
    let log = logging::init(params.verbose);

    if let Command::Version = params.command {
        println!("{}", env!("GIT_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(params)?;
    let context = BuildContext::new(
        working_dir(params)?,
        params.sdk_version.as_deref().unwrap_or_default(),
        params.build_name.as_deref().unwrap_or_default(),
    );
    let stamp = VersionStamper::new(&config, &context).run(&GitRunner, &log);
    emit(&params.command, &stamp, &log)?;

    Ok(ExitCode::SUCCESS)
}

/// Produce the output requested by `command`.
///
/// # Errors
///
/// Returns an error if the stamp couldn’t be serialized.
fn emit(
    command: &Command,
    stamp: &Stamp<'_>,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    match command {
        Command::Java => {
            stamp.write_template(log);
        }
        Command::Cflags => {
            for flag in stamp.flags(log) {
                println!("{flag}");
            }
        }
        Command::Describe => println!("{}", stamp.version),
        Command::Snapshot => {
            println!("{}", serde_json::to_string_pretty(stamp)?);
        }
        Command::Summary => print!("{}", stamp.summary()),
        Command::Version => {} // Handled before stamping.
    }
    Ok(())
}

/// Load the configuration file, if any, and apply overrides.
///
/// # Errors
///
/// Returns an error if a configuration file was given and couldn’t be read
/// or parsed.
fn load_config(params: &Params) -> anyhow::Result<Config> {
    let mut config = match &params.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(source_dir) = &params.source_dir {
        config.source_dir.clone_from(source_dir);
    }
    Ok(config)
}

/// The build’s working directory.
///
/// Falls back to the current directory if `--pwd` and `$PWD` are unset.
///
/// # Errors
///
/// Returns an error if the current directory couldn’t be determined.
fn working_dir(params: &Params) -> anyhow::Result<PathBuf> {
    match &params.pwd {
        Some(pwd) => Ok(pwd.clone()),
        None => Ok(std::env::current_dir()?),
    }
}
