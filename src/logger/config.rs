/// Logger configuration
///
/// Held in a process-wide `RwLock` so every call site reads the same filter
/// rules without passing a handle around.
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Lines above this level are dropped (errors always pass)
    pub min_level: LogLevel,
    /// Modules enabled through `--debug-<module>`
    pub debug_modules: HashSet<String>,
    pub console_enabled: bool,
    pub file_enabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_modules: HashSet::new(),
            console_enabled: true,
            file_enabled: true,
        }
    }
}

impl LoggerConfig {
    pub fn with_debug_module(mut self, module: &str) -> Self {
        self.debug_modules.insert(module.to_string());
        self
    }

    pub fn is_debug_enabled_for_tag(&self, tag: &LogTag) -> bool {
        self.min_level == LogLevel::Verbose || self.debug_modules.contains(tag.debug_module())
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}
