use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

/// Environment variable that overrides the default log level.
pub const LOG_LEVEL_ENV: &str = "VIDEO_LOG";

static START: OnceLock<Instant> = OnceLock::new();

/// A logger that writes to stdout, prefixing each line with the time since startup.
pub struct StdoutLogger;

impl StdoutLogger {
    fn elapsed() -> f64 {
        START.get_or_init(Instant::now).elapsed().as_secs_f64()
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("-");
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);
        println!(
            "[{:>10.4}] {:<5} [{}] {}:{} - {}",
            Self::elapsed(),
            record.level(),
            thread_name,
            file,
            line,
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Parse a level name as accepted in `VIDEO_LOG`.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Level used when `VIDEO_LOG` is unset or unreadable.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize the global logger with StdoutLogger.
///
/// The level comes from `VIDEO_LOG` when it names a valid level, otherwise
/// [`default_level`]. Only the first call per process installs the logger.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    let max_level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or_else(default_level);

    START.get_or_init(Instant::now);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}
