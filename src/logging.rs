//! Tracing setup for both binaries.
//!
//! The player daemon logs to stderr. The panel owns the terminal, so its
//! logs go to a daily rolling file instead.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "oscdp-panel";

fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

/// Log to stderr. The level can be controlled via `RUST_LOG`.
pub fn init_stderr(settings: &LoggingSettings) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Log to `<dir>/oscdp-panel.YYYY-MM-DD` with daily rotation.
pub fn init_file(settings: &LoggingSettings) -> anyhow::Result<()> {
    let log_dir = Path::new(&settings.dir);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The writer must outlive every log call; the panel never tears logging down.
    Box::leak(Box::new(guard));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", settings.dir);
    Ok(())
}
