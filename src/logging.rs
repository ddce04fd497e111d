//! Stderr logger behind the `log` facade.
//!
//! Lines are written as `uxs-architect: LEVEL message`. The level comes from
//! the `-v` count on the command line, or `UXS_LOG` when that is set.

use log::{LevelFilter, Log, Metadata, Record};
use std::env;
use std::io::Write;

pub const ENV_LOG_LEVEL: &str = "UXS_LOG";
const PREFIX: &str = "uxs-architect";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{PREFIX}: {} {}", record.level(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level for a `-v` count: warn, info, debug, then trace.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. `UXS_LOG` overrides the verbosity-derived level.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init(verbose: u8) {
    let level = env::var(ENV_LOG_LEVEL)
        .ok()
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or_else(|| level_for_verbosity(verbose));
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
