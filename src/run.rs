/// Report run: fetch token details, add the review fields, render the PDF
///
/// Both failure paths (fetch and generation) print a message and return
/// normally; the process exit code is not changed by either.
use crate::config::RugcheckConfig;
use crate::logger::{self, LogTag};
use crate::paths::resolve_output_directory;
use crate::report::{enrich, ReportGenerator};
use crate::tokens::{open_session_count, HttpSession, TokenDetailsSource};
use crate::utils::short_address;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Generated(PathBuf),
    /// The current directory could not be read and no `--output` was given
    OutputUnavailable(String),
    /// Token details could not be fetched; nothing was generated
    FetchFailed(String),
    GenerationFailed(String),
}

impl ReportOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, ReportOutcome::Generated(_))
    }
}

/// Run one report for `address`
///
/// The HTTP session is opened here and dropped before returning on every
/// path. User-facing lines go to `out`; diagnostics go to the logger.
pub async fn generate_report<S, G, W>(
    address: &str,
    output_dir: Option<&Path>,
    http: &RugcheckConfig,
    source: &S,
    generator: &G,
    out: &mut W,
) -> ReportOutcome
where
    S: TokenDetailsSource + ?Sized,
    G: ReportGenerator + ?Sized,
    W: Write,
{
    let started = Instant::now();

    let output_dir = match resolve_output_directory(output_dir) {
        Ok(dir) => dir,
        Err(e) => {
            let message = format!("cannot determine output directory: {}", e);
            print_line(out, &format!("Error: {}", message));
            return ReportOutcome::OutputUnavailable(message);
        }
    };

    let session = match HttpSession::open(http) {
        Ok(session) => session,
        Err(e) => {
            print_line(out, &format!("Error: {}", e));
            return ReportOutcome::FetchFailed(e.to_string());
        }
    };

    logger::info(
        LogTag::Report,
        &format!(
            "Fetching token details for {} from {}",
            short_address(address),
            source.name()
        ),
    );

    let details = match source.fetch_token_details(address, &session).await {
        Ok(details) => details,
        Err(e) => {
            logger::error(
                LogTag::Report,
                &format!("Token details fetch failed for {}: {}", short_address(address), e),
            );
            print_line(out, &format!("Error: {}", e));
            return ReportOutcome::FetchFailed(e.to_string());
        }
    };

    if details.is_empty() {
        logger::warning(
            LogTag::Report,
            &format!("{} returned no fields for {}", source.name(), short_address(address)),
        );
    } else {
        logger::debug(
            LogTag::Report,
            &format!("Fetched {} field(s) for {}", details.len(), details.display_name()),
        );
    }

    let fields = enrich(details.into_map());

    let outcome = match generator.create_pdf(&fields, &output_dir) {
        Ok(path) => {
            print_line(
                out,
                &format!("\nReport generated successfully: {}", path.display()),
            );
            ReportOutcome::Generated(path)
        }
        Err(e) => {
            logger::error(LogTag::Report, &format!("PDF generation failed: {}", e));
            print_line(out, &format!("Error generating PDF report: {}", e));
            ReportOutcome::GenerationFailed(e.to_string())
        }
    };

    drop(session);
    logger::debug(
        LogTag::Report,
        &format!(
            "Report run finished in {}ms ({} HTTP session(s) still open)",
            started.elapsed().as_millis(),
            open_session_count()
        ),
    );
    outcome
}

fn print_line<W: Write>(out: &mut W, line: &str) {
    if writeln!(out, "{}", line).and_then(|_| out.flush()).is_err() {
        logger::warning(LogTag::System, "Could not write to output stream");
    }
}
