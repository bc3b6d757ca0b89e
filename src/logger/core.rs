/// Core logging implementation with automatic filtering
use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Decide whether a line is emitted
///
/// 1. Errors are always shown
/// 2. Anything above the minimum level is dropped
/// 3. Debug requires `--debug-<module>` for the tag (or `--verbose`)
/// 4. Verbose requires `--verbose`
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    match level {
        LogLevel::Error => true,
        LogLevel::Debug => config.is_debug_enabled_for_tag(tag),
        LogLevel::Verbose => config.min_level == LogLevel::Verbose,
        _ => level <= config.min_level,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(&config, tag, level, message);
}
