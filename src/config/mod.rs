//! Configuration for spl-report
//!
//! Structures are declared once with their defaults through `config_struct!`
//! and read from TOML. A missing file means all defaults.

mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, LoggingConfig, ReportSettings, RugcheckConfig};
pub use utils::{load_config_from_path, parse_config, validate_config};
