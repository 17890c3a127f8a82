//! Test helpers for unit tests.

use crate::{Error, Result, Runner};
use bstr::ByteSlice;
use duct::cmd;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A logger that throws everything away.
#[must_use]
pub fn discard_log() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// A drain that keeps every record so tests can check what was logged.
#[derive(Clone, Debug, Default)]
pub struct Capture {
    /// Level and message of each record, in order.
    records: Arc<Mutex<Vec<(slog::Level, String)>>>,
}

impl Capture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger that records into this capture.
    #[must_use]
    pub fn logger(&self) -> slog::Logger {
        slog::Logger::root(self.clone(), slog::o!())
    }

    /// Messages logged at warning level or worse.
    ///
    /// # Panics
    ///
    /// Panics if the lock was poisoned.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| level.is_at_least(slog::Level::Warning))
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl slog::Drain for Capture {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record<'_>,
        _values: &slog::OwnedKVList,
    ) -> Result<(), slog::Never> {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.msg().to_string()));
        Ok(())
    }
}

/// Convenience functions for working with directory-like things.
pub trait FsDirectory {
    /// Get the path to this directory.
    #[must_use]
    fn path(&self) -> &Path;

    /// Join a path to this.
    ///
    /// Equivalent to `dir.path().join(...)`.
    #[must_use]
    #[inline]
    fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.path().join(path)
    }

    /// Make a subdirectory.
    ///
    /// Creates all parent directories if necessary.
    fn mkdir<P: AsRef<Path>>(&self, path: P) {
        fs::create_dir_all(self.join(path)).unwrap();
    }

    /// Write a file.
    ///
    /// Creates all parent directories if necessary.
    fn write<P: AsRef<Path>>(&self, path: P, content: &str) {
        let path = self.join(path);
        self.mkdir(path.parent().unwrap());
        fs::write(path, content).unwrap();
    }
}

/// The home directory for `git` operations.
#[derive(Debug)]
pub struct Home(PathBuf);

impl FsDirectory for Home {
    /// Get the path to the home directory.
    fn path(&self) -> &Path {
        &self.0
    }
}

impl Home {
    /// Create a `Home` for an existing directory.
    pub fn existing<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    /// # Create a new home directory.
    ///
    /// ## `.gitconfig`
    ///
    /// `user.name` and `user.email` must be set for commits to work in CI.
    /// Having them set also helps to avoid confusing warnings, as do the
    /// settings in `advice`. `init.defaultBranch` is set so that branch names
    /// are predictable.
    ///
    /// # Panics
    ///
    ///   * It can’t create the directory at `path` and the directory doesn’t
    ///     already exist.
    ///   * It can’t write `{path}/.gitconfig`.
    pub fn init<P: Into<PathBuf>>(path: P) -> Self {
        let home = Self::existing(path);
        home.write(
            ".gitconfig",
            "[user]\n\
            name = Name\n\
            email = name@example.com\n\
            [init]\n\
            defaultBranch = main\n\
            [advice]\n\
            detachedHead = false\n",
        );
        home
    }

    /// Run `git` in the `cwd` directory and panic on errors.
    ///
    /// Prints `git` command line and working directory to stdout. If the
    /// command is successful, it prints its output, too.
    ///
    /// # Panics
    ///
    /// Panics if the process fails, or if there was an actual IO error.
    pub fn git<P, I, S>(&self, cwd: P, args: I) -> String
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let shell_args =
            shell_words::join(args.iter().map(|arg| arg.to_string_lossy()));

        println!("`git {shell_args}` in {:?}", self.join(&cwd));
        let output = run_git(&self.0, cwd, args).run().unwrap();
        let output = output.stdout.to_str_lossy().into_owned();
        print!("{output}");
        output
    }

    /// Create a git repository.
    ///
    /// # Panics
    ///
    /// Panics if there was a problem creating the repository.
    pub fn git_init<P: AsRef<Path>>(&self, path: P) -> Repo<'_> {
        let path = self.join(path);
        self.git(&self.0, [o("init"), o(&path)]);
        Repo { home: self, repo: path }
    }

    /// Get a [`Runner`] that uses this home’s `.gitconfig`.
    #[must_use]
    pub fn runner(&self) -> HomeRunner<'_> {
        HomeRunner { home: self }
    }
}

/// A git repo.
#[derive(Debug)]
pub struct Repo<'a> {
    /// The home directory used to run `git`.
    home: &'a Home,

    /// The working directory of the repo.
    repo: PathBuf,
}

impl FsDirectory for Repo<'_> {
    /// Get the path to this repo.
    fn path(&self) -> &Path {
        &self.repo
    }
}

impl Repo<'_> {
    /// Run `git` in the repo directory and panic on errors.
    ///
    /// # Panics
    ///
    /// Panics if the process fails, or if there was an actual IO error.
    pub fn git<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.home.git(&self.repo, args)
    }

    /// Make a commit with files a and b.
    ///
    /// # Panics
    ///
    /// Panics if there was a problem creating the commit.
    pub fn make_commit(&self, n: u8) {
        self.commit_with_footers(n, &[]);
    }

    /// Make a commit with files a and b and footer lines in the message.
    ///
    /// # Panics
    ///
    /// Panics if there was a problem creating the commit.
    pub fn commit_with_footers(&self, n: u8, footers: &[&str]) {
        self.write("a", &format!("{n}a"));
        self.write("b", &format!("{n}b"));
        self.git(["add", "a", "b"]);

        let subject = format!("commit {n}");
        let mut args = vec!["commit", "-m", subject.as_str()];
        let footers = footers.join("\n");
        if !footers.is_empty() {
            args.extend(["-m", footers.as_str()]);
        }
        self.git(args);
    }

    /// Get the abbreviated hash of `HEAD`.
    ///
    /// # Panics
    ///
    /// Panics if there is no `HEAD` commit.
    pub fn short_head(&self) -> String {
        self.git(["rev-parse", "--short", "HEAD"]).trim().to_owned()
    }
}

/// Runs `git` with the `.gitconfig` in a [`Home`].
#[derive(Debug)]
pub struct HomeRunner<'a> {
    /// The home directory.
    home: &'a Home,
}

impl Runner for HomeRunner<'_> {
    fn git(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        let output = run_git(self.home.path(), dir, args.iter().copied())
            .unchecked()
            .run()
            .map_err(|error| Error::Query {
                command: command.clone(),
                message: error.to_string(),
            })?;
        let text = output.stdout.to_str_lossy().into_owned();
        if output.status.success() {
            Ok(text)
        } else {
            Err(Error::Query { command, message: text })
        }
    }
}

/// A [`Runner`] that replays canned output.
///
/// Queries without a reply fail.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    /// Replies keyed by space-separated arguments.
    replies: HashMap<String, Result<String, String>>,

    /// Every call made, as `(dir, args)`.
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl ScriptedRunner {
    /// Create a runner with no replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `args` with `output`.
    #[must_use]
    pub fn reply(mut self, args: &[&str], output: &str) -> Self {
        self.replies.insert(args.join(" "), Ok(output.to_owned()));
        self
    }

    /// Fail `args` with `message`.
    #[must_use]
    pub fn fail(mut self, args: &[&str], message: &str) -> Self {
        self.replies.insert(args.join(" "), Err(message.to_owned()));
        self
    }

    /// The arguments of every call made so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, args)| args.clone()).collect()
    }

    /// The directory of every call made so far.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(dir, _)| dir.clone()).collect()
    }
}

impl Runner for ScriptedRunner {
    fn git(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.calls.borrow_mut().push((dir.to_owned(), command.clone()));
        match self.replies.get(&command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(Error::Query {
                command: format!("git {command}"),
                message: message.clone(),
            }),
            None => Err(Error::Query {
                command: format!("git {command}"),
                message: "no scripted reply".to_owned(),
            }),
        }
    }
}

/// Convert something to an [`OsString`].
pub fn o<S: Into<OsString>>(input: S) -> OsString {
    input.into()
}

/// Set up a call to `git` in the `cwd` directory.
///
/// If `cwd` is relative, it will be interpreted in the context of `home`.
/// `home` should contain a `.gitconfig` file.
pub fn run_git<PH, PC, I, S>(home: PH, cwd: PC, args: I) -> duct::Expression
where
    PH: AsRef<Path>,
    PC: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let home: &Path = home.as_ref();
    cmd("git", args)
        .dir(home.join(cwd))
        .env("HOME", home)
        .env("GIT_CONFIG_GLOBAL", home.join(".gitconfig"))
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .stderr_to_stdout()
        .stdout_capture()
}
