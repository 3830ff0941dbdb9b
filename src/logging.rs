#![cfg(feature = "runtime")]
//! Stderr logger for the terminal front ends.
//!
//! Lines go to stderr so they never interleave with the boards printed on
//! stdout. Records from other crates are only shown at `warn` and above.

use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Metadata, Record};

/// Environment variable holding the level for this crate's records.
pub const LOG_ENV: &str = "BROADSIDE_LOG";

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

static STARTED: OnceLock<Instant> = OnceLock::new();

struct MatchLogger;

impl log::Log for MatchLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let ours = metadata.target().starts_with(CRATE_TARGET);
        metadata.level() <= log::max_level() && (ours || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = STARTED.get().map(|t| t.elapsed()).unwrap_or_default();
        eprintln!(
            "[{:>8.3}s {:<5} {}] {}",
            elapsed.as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: MatchLogger = MatchLogger;

/// Level for a `BROADSIDE_LOG` value. Unset or unparsable values mean `warn`.
pub fn log_level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the logger with the level taken from `BROADSIDE_LOG`. Calling it
/// again keeps the first logger.
pub fn init_logging() {
    STARTED.get_or_init(Instant::now);
    let level = log_level_from(std::env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
