use anyhow::{bail, Context};
use clap::Parser;
use spl_report::{
    arguments::Cli,
    config::{self, Config},
    logger::{self, LogTag},
    paths,
    report::PdfReportGenerator,
    run::generate_report,
    tokens::RugcheckClient,
};
use std::process::ExitCode;

/// Entry point for spl-report
///
/// Handled failures (token not found, network errors, PDF errors) print a
/// message and still exit with 0. Only startup problems exit non-zero.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let logs_dir = if config.logging.file_logging && !cli.no_file_log {
        paths::ensure_log_directory().ok()
    } else {
        None
    };
    logger::init(cli.logger_config(&config.logging), logs_dir.as_deref());

    if cli.config.is_none() && !paths::get_config_path().exists() {
        logger::debug(
            LogTag::Config,
            &format!(
                "No config at {}, using defaults",
                paths::get_config_path().display()
            ),
        );
    }

    logger::debug(
        LogTag::System,
        &format!(
            "spl-report {} starting (rugcheck: {}, attempts: {})",
            env!("CARGO_PKG_VERSION"),
            config.rugcheck.base_url,
            config.rugcheck.max_attempts
        ),
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::error(LogTag::System, &format!("Failed to start tokio runtime: {}", e));
            logger::flush();
            return ExitCode::FAILURE;
        }
    };

    println!("\nGenerating security report for token: {}", cli.address);

    let source = RugcheckClient::new(&config.rugcheck);
    let generator = PdfReportGenerator::new(config.report.clone());
    let output_dir = cli.output_dir();
    let mut stdout = std::io::stdout();

    let outcome = runtime.block_on(generate_report(
        &cli.address,
        output_dir.as_deref(),
        &config.rugcheck,
        &source,
        &generator,
        &mut stdout,
    ));

    logger::debug(LogTag::System, &format!("Outcome: {:?}", outcome));
    logger::flush();
    ExitCode::SUCCESS
}

/// Explicit `--config` must exist; the default location may be absent
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            config::load_config_from_path(path)
                .with_context(|| format!("loading {}", path.display()))
                .map(Option::unwrap_or_default)
        }
        None => {
            let path = paths::get_config_path();
            config::load_config_from_path(&path)
                .with_context(|| format!("loading {}", path.display()))
                .map(Option::unwrap_or_default)
        }
    }
}
