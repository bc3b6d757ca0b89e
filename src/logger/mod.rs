//! Structured logging for spl-report
//!
//! - Standard levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via `--debug-<module>` flags
//! - Colored console output on stderr plus a plain daily log file
//!
//! ## Usage
//!
//! ```rust
//! use spl_report::logger::{self, LogTag};
//!
//! logger::info(LogTag::Rugcheck, "Fetching token report");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only with --debug-api
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use self::core::should_log;
pub use levels::LogLevel;
pub use tags::LogTag;

use std::path::Path;

/// Install the logger configuration and open the log file
///
/// Call once at startup. When `logs_dir` is `None` or the file cannot be
/// opened, logging continues on the console only.
pub fn init(mut config: LoggerConfig, logs_dir: Option<&Path>) {
    if config.file_enabled {
        match logs_dir.map(file::init_file_logging) {
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                config.file_enabled = false;
                set_logger_config(config);
                warning(
                    LogTag::System,
                    &format!("File logging disabled, could not open log file: {}", e),
                );
                return;
            }
            None => config.file_enabled = false,
        }
    }

    set_logger_config(config);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    self::core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    self::core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    self::core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown with the tag's `--debug-<module>` flag
pub fn debug(tag: LogTag, message: &str) {
    self::core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, only shown with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    self::core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending log file writes
pub fn flush() {
    file::flush_file_logging();
}
