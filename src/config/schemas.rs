/// Configuration schemas with embedded defaults
use crate::config_struct;

// ============================================================================
// RUGCHECK API
// ============================================================================

config_struct! {
    /// Token analysis service settings
    pub struct RugcheckConfig {
        /// Token endpoint root; reports are read from `{base_url}/{mint}/report`
        base_url: String = "https://api.rugcheck.xyz/v1/tokens".to_string(),
        timeout_secs: u64 = 10,
        /// 1 initial attempt + retries on 429, 5xx and transport errors
        max_attempts: u32 = 4,
        retry_base_delay_ms: u64 = 250,
        user_agent: String = format!("spl-report/{}", env!("CARGO_PKG_VERSION")),
    }
}

// ============================================================================
// REPORT OUTPUT
// ============================================================================

config_struct! {
    /// PDF layout settings
    pub struct ReportSettings {
        file_prefix: String = "spl_security_report".to_string(),
        max_risks: usize = 20,
        max_top_holders: usize = 10,
        lines_per_page: usize = 60,
        /// Characters per line before wrapping (Courier 9pt on A4)
        line_width: usize = 90,
    }
}

// ============================================================================
// LOGGING
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        file_logging: bool = true,
        /// error | warning | info | debug | verbose
        min_level: String = "info".to_string(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    pub struct Config {
        rugcheck: RugcheckConfig = RugcheckConfig::default(),
        report: ReportSettings = ReportSettings::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
