//! Minimal `log` backend writing `[LEVEL] message` lines to stderr.
//!
//! Stdout is left to the trace and results table.

use log::{LevelFilter, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already set.
pub fn init(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    Ok(())
}

/// Level from `MLQ_LOG` (`off`, `error`, ... `trace`), `warn` when unset or invalid.
pub fn level_from_env() -> LevelFilter {
    crate::config::env_parse("MLQ_LOG").unwrap_or(LevelFilter::Warn)
}
