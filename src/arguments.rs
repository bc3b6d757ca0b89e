/// Command-line arguments for spl-report
///
/// Debug output follows the `--debug-<module>` convention: each flag enables
/// DEBUG lines for the log tags of that module.
use crate::config::LoggingConfig;
use crate::logger::{LogLevel, LoggerConfig};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "spl-report",
    version,
    about = "Generate Solana Token Security Report"
)]
pub struct Cli {
    /// Solana token address
    pub address: String,

    /// Output directory for the report (optional, defaults to the current directory)
    #[arg(
        short,
        long,
        value_name = "DIR",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging for HTTP and Rugcheck calls
    #[arg(long)]
    pub debug_api: bool,

    /// Debug logging for report layout and PDF output
    #[arg(long)]
    pub debug_report: bool,

    /// Debug logging for startup and configuration
    #[arg(long)]
    pub debug_system: bool,

    /// Log everything, including raw API responses
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long)]
    pub quiet: bool,

    /// Do not write a log file
    #[arg(long)]
    pub no_file_log: bool,
}

impl Cli {
    /// Output directory with an empty `--output ""` treated as absent
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Combine flags with the `[logging]` config section; flags win
    pub fn logger_config(&self, logging: &LoggingConfig) -> LoggerConfig {
        let mut config = LoggerConfig {
            min_level: logging.min_level.parse().unwrap_or(LogLevel::Info),
            file_enabled: logging.file_logging && !self.no_file_log,
            ..LoggerConfig::default()
        };

        if self.verbose {
            config.min_level = LogLevel::Verbose;
        } else if self.quiet {
            config.min_level = LogLevel::Error;
        }

        for (enabled, module) in [
            (self.debug_api, "api"),
            (self.debug_report, "report"),
            (self.debug_system, "system"),
        ] {
            if enabled {
                config = config.with_debug_module(module);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spl-report").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_address_only() {
        let cli = parse(&["TokenXYZ"]);
        assert_eq!(cli.address, "TokenXYZ");
        assert_eq!(cli.output_dir(), None);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_output_short_and_long() {
        assert_eq!(
            parse(&["TokenXYZ", "-o", "/tmp/reports"]).output_dir(),
            Some(PathBuf::from("/tmp/reports"))
        );
        assert_eq!(
            parse(&["--output", "out", "TokenXYZ"]).output_dir(),
            Some(PathBuf::from("out"))
        );
    }

    #[test]
    fn test_empty_output_means_current_directory() {
        assert_eq!(parse(&["TokenXYZ", "--output", ""]).output_dir(), None);
        assert_eq!(parse(&["TokenXYZ", "-o", ""]).output_dir(), None);
        assert_eq!(parse(&["--output=", "TokenXYZ"]).output_dir(), None);
    }

    #[test]
    fn test_address_is_required() {
        assert!(Cli::try_parse_from(["spl-report"]).is_err());
        assert!(Cli::try_parse_from(["spl-report", "-o", "x"]).is_err());
    }

    #[test]
    fn test_logger_config_from_flags() {
        let cli = parse(&["TokenXYZ", "--debug-api", "--no-file-log"]);
        let config = cli.logger_config(&LoggingConfig::default());
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_modules.contains("api"));
        assert!(!config.debug_modules.contains("report"));
        assert!(!config.file_enabled);

        let quiet = parse(&["TokenXYZ", "--quiet"]).logger_config(&LoggingConfig::default());
        assert_eq!(quiet.min_level, LogLevel::Error);
        assert!(quiet.file_enabled);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["spl-report", "TokenXYZ", "--verbose", "--quiet"]).is_err());
    }
}
