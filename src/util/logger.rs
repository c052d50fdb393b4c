//! Console backend for the `log` facade.

use std::{
    env,
    io::{self, IsTerminal, Write},
};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::OffsetDateTime;

/// Overrides the configured log level, e.g. `FLIGHT_PLANNER_LOG=debug`.
pub const LOG_ENV_VAR: &str = "FLIGHT_PLANNER_LOG";

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Writes `[LEVEL] [HH:MM:SS] message` lines to stderr, coloured per level
/// when stderr is a terminal.
pub struct ConsoleLogger;

impl ConsoleLogger {
    fn colour(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[35m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[90m",
        }
    }
}

pub fn colourise(level: Level, line: &str) -> String {
    format!("{}{line}\x1b[0m", ConsoleLogger::colour(level))
}

pub fn format_line(level: Level, at: OffsetDateTime, message: &str) -> String {
    format!(
        "[{level:<5}] [{:02}:{:02}:{:02}] {message}",
        at.hour(),
        at.minute(),
        at.second()
    )
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            record.level(),
            OffsetDateTime::now_utc(),
            &record.args().to_string(),
        );
        let mut stderr = io::stderr().lock();
        let line = if stderr.is_terminal() {
            colourise(record.level(), &line)
        } else {
            line
        };
        // Nothing sensible to do if stderr is gone.
        let _ = writeln!(stderr, "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Level from [`LOG_ENV_VAR`] if it is set and valid, else `configured`.
pub fn resolve_level(configured: LevelFilter) -> LevelFilter {
    env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(configured)
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
