//! Terminal logging for the command-line tool.

use std::sync::Mutex;

use slog::{o, Drain, Level, Logger};

/// Maps `-q` / `-v` flags to the most verbose level that is shown.
///
/// Warnings are shown by default so that skipped column references are
/// visible without any flag.
pub(crate) fn level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::Error;
    }
    match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        _ => Level::Debug,
    }
}

/// Builds a logger that writes compact records to stderr.
pub(crate) fn stderr_logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build();
    let drain = Mutex::new(drain).filter_level(level).fuse();
    Logger::root(drain, o!())
}
