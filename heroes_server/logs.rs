use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "heroes";
const DEFAULT_FILTER: &str = "info,heroes=debug,heroes_app=debug,heroes_db=debug,heroes_web=debug";

/// Daily rotated `heroes.<date>.log` files under `log_dir`, created on the spot.
pub fn log_file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
}

/// Logs to stdout and to the rotated files in `log_dir`. Levels come from
/// `RUST_LOG`, falling back to `info` with `debug` for the heroes crates.
///
/// When `log_dir` can't be written, only stdout is used. The returned guard
/// flushes the file writer on drop and must live as long as the server.
pub fn setup_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let (file_layer, guard, file_error) = match log_file_appender(log_dir) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_thread_ids(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!(
            "File logging disabled, cannot write to {}: {e}",
            log_dir.display()
        );
    }

    guard
}
