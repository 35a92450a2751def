//! Structured logging configuration
//!
//! Provides:
//! - JSON output for machine consumption
//! - Pretty formatting for interactive use
//! - Optional daily-rolling log files
//! - A per-run span so every event of one invocation shares a `run_id`
//!
//! Console logs go to stderr; stdout is reserved for the report.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Span;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

const LOG_FILE_NAME: &str = "nginx-logs.log";

/// Initialize the logging system based on configuration.
///
/// The returned guard flushes file output when dropped; keep it alive until exit.
pub fn init_logging(config: &LoggingConfig, log_dir: &Path) -> Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the configured level
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.output.as_str() {
        "file" => init_file_logging(env_filter, &config.format, log_dir).map(Some),
        "both" => init_combined_logging(env_filter, &config.format, log_dir).map(Some),
        _ => init_console_logging(env_filter, &config.format).map(|_| None),
    }
}

fn init_console_logging(filter: EnvFilter, format: &str) -> Result<()> {
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        "json" => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .try_init()?,
        _ => subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?,
    }
    Ok(())
}

fn file_writer(
    log_dir: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(file_appender))
}

fn init_file_logging(filter: EnvFilter, format: &str, log_dir: &Path) -> Result<WorkerGuard> {
    let (non_blocking, guard) = file_writer(log_dir)?;
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        "json" => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?,
    }
    Ok(guard)
}

fn init_combined_logging(filter: EnvFilter, format: &str, log_dir: &Path) -> Result<WorkerGuard> {
    let (non_blocking, guard) = file_writer(log_dir)?;
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        "json" => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .try_init()?,
    }
    Ok(guard)
}

/// Span covering one invocation, tagged with a fresh `run_id`
pub fn run_span(url: &str) -> Span {
    tracing::info_span!("run", run_id = %Uuid::new_v4(), url = %url)
}
