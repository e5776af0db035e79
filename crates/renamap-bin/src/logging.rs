use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the logging context for a run: console output on stderr plus an
/// append-mode log file. Nothing is installed globally; callers scope it
/// with `tracing::dispatcher::with_default`.
pub fn build_dispatch(log_file: &Path, verbose: bool, quiet: bool) -> Result<Dispatch> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let appender = open_log_file(log_file)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
        )
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
        )
        .with(filter);

    Ok(Dispatch::new(subscriber))
}

fn open_log_file(log_file: &Path) -> Result<RollingFileAppender> {
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Invalid log file path: {:?}", log_file))?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {:?}", directory))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)
        .with_context(|| format!("Failed to open log file {:?}", log_file))
}
