use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "glimpse.log";

/// Keeps the background log writer alive; drop it last
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// The terminal belongs to the game, so logs only go to a file and only
/// when `RUST_LOG` asks for them.
pub fn file_logging_enabled() -> bool {
    std::env::var("RUST_LOG").is_ok_and(|v| !v.trim().is_empty())
}

pub fn init_tracing(log_dir: &Path) -> Option<FileLogGuard> {
    if !file_logging_enabled() {
        return None;
    }

    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {err}", log_dir.display());
        return None;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(FileLogGuard { _guard: guard })
}
