use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

const LOG_FILE_PREFIX: &str = "mock-test.log";

/// Opens the daily rolling log file under `log_dir`, creating the
/// directory first.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, AppError> {
    fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)?;
    Ok(appender)
}

/// Sends tracing output to a daily rolling file under `log_dir`.
///
/// The terminal belongs to the UI, so nothing is written to stdout. Keep
/// the returned guard alive until exit or buffered lines are lost.
pub fn init(log_dir: &Path, filter: &str) -> Result<WorkerGuard, AppError> {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}
