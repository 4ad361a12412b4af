//! Minimal stderr logger for the `log` facade.
//!
//! The level comes from `CPU_SCHED_LOG` (`off`, `error`, `warn`, `info`,
//! `debug`, `trace`); unset or unrecognised values mean `warn`.

use log::{LevelFilter, Metadata, Record, SetLoggerError};

pub const LOG_ENV: &str = "CPU_SCHED_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Parse a level name; `None` for anything unrecognised.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}

pub fn init() -> Result<(), SetLoggerError> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Warn);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
