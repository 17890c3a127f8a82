//! Set up logging.

use slog::{Drain, Level};

/// Create the root logger.
///
/// Logs go to stderr so that stdout only carries output. By default only
/// warnings and errors are shown; each `-v` shows one more level.
pub fn init(verbose: u8) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(level(verbose)).fuse();
    slog::Logger::root(drain, slog::o!())
}

/// The most verbose level shown for a `-v` count.
const fn level(verbose: u8) -> Level {
    match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}
