//! Logging setup for TinyQueue using tracing.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log output goes besides stderr.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log directory; the platform data directory when unset.
    pub dir: Option<PathBuf>,
    /// Write a daily rolling log file.
    pub file: bool,
}

/// Initialize logging with console output and an optional file appender.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init(options: &LogOptions) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tinyqueue=debug"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let (file_layer, guard, log_dir) = if options.file {
        let log_dir = resolve_log_dir(options.dir.as_deref())?;
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = tracing_appender::rolling::daily(&log_dir, "tinyqueue.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        (Some(layer), Some(guard), Some(log_dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    tracing::info!("TinyQueue logging initialized");
    if let Some(dir) = log_dir {
        tracing::info!("Log directory: {}", dir.display());
    }

    Ok(guard)
}

/// Pick the log directory: the explicit one, else `<data dir>/logs`.
pub fn resolve_log_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let dirs = directories::ProjectDirs::from("com", "tinyqueue", "tinyqueue")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

    Ok(dirs.data_dir().join("logs"))
}

/// Initialize logging for tests (console only, no file). Safe to call repeatedly.
#[cfg(test)]
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_dir_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = resolve_log_dir(Some(temp_dir.path())).unwrap();
        assert_eq!(dir, temp_dir.path());
    }

    #[test]
    fn test_default_log_dir_is_under_data_dir() {
        // Only meaningful where the platform has a home directory.
        if let Ok(dir) = resolve_log_dir(None) {
            assert!(dir.ends_with("logs"));
        }
    }
}
