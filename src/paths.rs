//! Centralized path resolution for spl-report
//!
//! Application files live under a platform data directory:
//! - **macOS**: `~/Library/Application Support/SPLReport/`
//! - **Windows**: `%LOCALAPPDATA%\SPLReport\`
//! - **Linux**: `$XDG_DATA_HOME/SPLReport/` (fallback `~/.local/share/SPLReport/`)
//!
//! ```text
//! SPLReport/
//! ├── data/
//! │   └── config.toml
//! └── logs/
//!     └── spl-report_*.log
//! ```
//!
//! Reports themselves are written to the directory given on the command line,
//! or the current working directory.

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "SPLReport";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Default configuration file, read only when it exists
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

pub fn ensure_log_directory() -> std::io::Result<PathBuf> {
    let dir = get_logs_directory();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Directory the report is written to
///
/// A missing or empty `requested` path means the current working directory,
/// read at call time.
pub fn resolve_output_directory(requested: Option<&Path>) -> std::io::Result<PathBuf> {
    match requested {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.to_path_buf()),
        _ => std::env::current_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults_to_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_output_directory(None).unwrap(), cwd);
        assert_eq!(resolve_output_directory(Some(Path::new(""))).unwrap(), cwd);
    }

    #[test]
    fn test_output_keeps_explicit_dir() {
        let dir = Path::new("reports/out");
        assert_eq!(resolve_output_directory(Some(dir)).unwrap(), dir);
    }

    #[test]
    fn test_layout_under_base() {
        let base: &Path = &BASE_DIRECTORY;
        assert!(get_config_path().starts_with(base));
        assert!(get_logs_directory().starts_with(base));
        assert!(base.ends_with(APP_DIR));
    }
}
