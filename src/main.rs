//! CLI entry point for the sales summary tool.
//!
//! Reads one CSV table and prints its JSON summary. The process exits with
//! status 0 whatever the input or arguments look like; failures are reported
//! inside the summary document. `--help` prints usage instead.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use sales_summary::{ProcessError, Summary, output};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sales_summary")]
#[command(about = "Summarize a CSV table of sales or values as JSON", long_about = None)]
struct Cli {
    /// CSV file to summarize
    #[arg(value_name = "INPUT", default_value = "data/data.csv")]
    input: PathBuf,

    /// Write the summary to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            let document = output::render(&Summary::from(argument_error(&e)));
            return output::print(&document);
        }
    };

    info!(input = %cli.input.display(), "Summarizing table");
    let document = sales_summary::process_to_string(&cli.input);

    match &cli.output {
        Some(path) => {
            if let Err(e) = output::write_file(path, &document) {
                error!(path = %path.display(), error = %e, "Failed to write summary file, printing instead");
                output::print(&document)?;
            } else {
                info!(path = %path.display(), "Summary written");
            }
        }
        None => output::print(&document)?,
    }

    Ok(())
}

/// Turns a clap usage error into the unexpected-error summary.
fn argument_error(err: &clap::Error) -> ProcessError {
    let rendered = err.to_string();
    let detail = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");
    error!(detail, "Invalid command-line arguments");
    ProcessError::unexpected(format!("invalid arguments: {}", detail))
}

/// Logs to stderr, plus a JSON rolling file when `LOG_FILE_PATH` is set.
///
/// stdout is reserved for the summary document.
fn init_logging() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_path = Path::new(&log_file_path);
            let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
            let log_file_name = log_path
                .file_name()
                .unwrap_or(OsStr::new("sales_summary.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", "debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
