/// Log tags identify which part of the program emitted a line.
///
/// Debug output is gated per tag through the `--debug-<module>` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Rugcheck,
    Report,
    Pdf,
}

impl LogTag {
    pub const ALL: [LogTag; 6] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Api,
        LogTag::Rugcheck,
        LogTag::Report,
        LogTag::Pdf,
    ];

    /// Upper-case label shown in the console and log file
    pub fn label(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Api => "API",
            LogTag::Rugcheck => "RUGCHECK",
            LogTag::Report => "REPORT",
            LogTag::Pdf => "PDF",
        }
    }

    /// Name of the `--debug-<module>` flag that enables DEBUG lines for this tag
    pub fn debug_module(&self) -> &'static str {
        match self {
            LogTag::System | LogTag::Config => "system",
            LogTag::Api | LogTag::Rugcheck => "api",
            LogTag::Report | LogTag::Pdf => "report",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
