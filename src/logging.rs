//! Tracing subscriber bootstrap

use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter, overridden by `RUST_LOG`
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "journal_bot=debug,info"
    } else {
        "info"
    }
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install the global subscriber: human-readable events on stderr and,
/// when `log_file` is given, the same events appended to that file.
///
/// A log file that cannot be opened does not disable logging; events still
/// reach stderr and the failure is reported as a warning.
pub fn init_logging(log_file: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let (file, file_error) = match log_file.map(open_log_file).transpose() {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };
    let file_layer =
        file.map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(e) = file_error {
        warn!("{:#}; logging to stderr only", e);
    }

    Ok(())
}
