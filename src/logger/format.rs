//! Log formatting and output with ANSI colors and text wrapping
//!
//! Console lines go to stderr so stdout only carries the report outcome.
//! The file copy is written without color codes.

use super::config::LoggerConfig;
use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::utils::{strip_ansi_codes, wrap_text};
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

const TAG_WIDTH: usize = 9;
const LEVEL_WIDTH: usize = 7;
/// `HH:MM:SS ` + `[TAG] ` + `[LEVEL] `
const PREFIX_WIDTH: usize = 9 + TAG_WIDTH + 3 + LEVEL_WIDTH + 3;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 140;

pub fn format_and_log(config: &LoggerConfig, tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();
    let chunks = wrap_text(message, MAX_LINE_LENGTH.saturating_sub(PREFIX_WIDTH).max(40));

    if config.console_enabled {
        let base_line = format!(
            "{} [{}] [{}] ",
            time.dimmed(),
            format_tag(&tag),
            format_level(level)
        );
        let continuation = " ".repeat(strip_ansi_codes(&base_line).len());
        for (index, chunk) in chunks.iter().enumerate() {
            if index == 0 {
                print_stderr_safe(&format!("{}{}", base_line, chunk));
            } else {
                print_stderr_safe(&format!("{}{}", continuation, chunk));
            }
        }
    }

    if config.file_enabled {
        let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        for chunk in &chunks {
            write_to_file(&format_file_line(&timestamp, &tag, level, chunk));
        }
    }
}

/// Plain-text line written to the log file
pub fn format_file_line(timestamp: &str, tag: &LogTag, level: LogLevel, message: &str) -> String {
    format!(
        "{} [{}] [{}] {}",
        timestamp,
        tag.label(),
        level.as_str(),
        strip_ansi_codes(message)
    )
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.label(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Api => padded.bright_purple().bold(),
        LogTag::Rugcheck => padded.bright_red().bold(),
        LogTag::Report => padded.bright_green().bold(),
        LogTag::Pdf => padded.bright_cyan().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.yellow().bold(),
        LogLevel::Info => padded.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => padded.dimmed(),
    }
}

/// Print to stderr, ignoring broken pipes
fn print_stderr_safe(message: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
    }
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_line_is_plain() {
        let colored_message = format!("fetched {}", "OK".green());
        let line = format_file_line(
            "2026-01-02 03:04:05",
            &LogTag::Rugcheck,
            LogLevel::Info,
            &colored_message,
        );
        assert_eq!(line, "2026-01-02 03:04:05 [RUGCHECK] [INFO] fetched OK");
    }
}
