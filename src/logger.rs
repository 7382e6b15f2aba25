//! Logging setup for the distribtest tools

use chrono::Local;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize logging with the given level string; unknown levels fall
/// back to `info`.
pub fn init_with_level(level_str: &str) {
    let level_filter = match level_str {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level_filter)
        .format(|buf, record| {
            write!(
                buf,
                "[{} {} {}] ",
                Local::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.target()
            )?;
            writeln!(buf, "{}", record.args())
        })
        .init();
}

/// Initialize logging from `DISTRIBTEST_LOG_LEVEL`, defaulting to `info`.
pub fn init() {
    let log_level = env::var("DISTRIBTEST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_with_level(&log_level);
}
