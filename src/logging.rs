//! File-based logging. The terminal belongs to the TUI, so nothing is written
//! to stdout or stderr once the interface is up.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "vocabcard";

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocabcard")
        .join("logs")
}

/// Logs go to `<data_dir>/vocabcard/logs/vocabcard.YYYY-MM-DD`, filtered by
/// `RUST_LOG` (default `vocabcard=debug,warn`). Keep the guard alive until
/// exit or buffered lines are lost.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vocabcard=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
