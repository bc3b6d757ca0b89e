/// Configuration loading and validation
use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::LogLevel;
use std::path::Path;

/// Parse a configuration file
///
/// A missing file yields `Ok(None)` so callers can fall back to defaults;
/// an unreadable or malformed file is an error.
pub fn load_config_from_path(path: &Path) -> Result<Option<Config>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config)?;
    Ok(Some(config))
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(contents)
}

/// Reject values that would make the run meaningless
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.rugcheck.base_url.trim().is_empty() {
        return Err(invalid("rugcheck.base_url", "must not be empty"));
    }
    if config.rugcheck.max_attempts == 0 {
        return Err(invalid("rugcheck.max_attempts", "must be at least 1"));
    }
    if config.report.lines_per_page < 10 {
        return Err(invalid("report.lines_per_page", "must be at least 10"));
    }
    if config.report.line_width < 20 {
        return Err(invalid("report.line_width", "must be at least 20"));
    }
    if config.logging.min_level.parse::<LogLevel>().is_err() {
        return Err(invalid(
            "logging.min_level",
            "expected error, warning, info, debug or verbose",
        ));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
