/// Error types for spl-report
///
/// `Display` output is what the CLI prints, so messages are written for
/// the person running the command.
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// TOKEN DETAILS FETCH
// =============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("token address is empty")]
    EmptyAddress,

    #[error("failed to open HTTP session: {0}")]
    Session(String),

    #[error("request to {endpoint} failed after {attempts} attempt(s): {message}")]
    Request {
        endpoint: String,
        attempts: u32,
        message: String,
    },

    #[error("token {address} not found")]
    NotFound { address: String },

    #[error("analysis service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to parse analysis response: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        FetchError::Other(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        FetchError::Other(message.to_string())
    }
}

// =============================================================================
// REPORT GENERATION
// =============================================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not create output directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output path {0} exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to encode PDF content: {0}")]
    Encode(String),

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::NotFound {
            address: "TokenXYZ".to_string(),
        };
        assert_eq!(err.to_string(), "token TokenXYZ not found");

        let err: FetchError = "Error: token not found".into();
        assert_eq!(err.to_string(), "Error: token not found");
    }

    #[test]
    fn test_report_error_includes_cause() {
        let err = ReportError::Write {
            path: PathBuf::from("/ro/report.pdf"),
            message: "Read-only file system".to_string(),
        };
        assert!(err.to_string().contains("Read-only file system"));
        assert!(err.to_string().contains("/ro/report.pdf"));
    }
}
