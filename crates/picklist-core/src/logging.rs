use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Errors from [`log_to_file`].
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The path has no file name component.
    #[error("log path has no file name: {0}")]
    NoFileName(String),
    /// The log file could not be opened.
    #[error("could not open log file: {0}")]
    Open(#[from] tracing_appender::rolling::InitError),
    /// A global subscriber is already installed.
    #[error("a tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Send `tracing` output to a file.
///
/// A terminal UI owns the screen, so diagnostics go to a file instead. The
/// filter comes from `RUST_LOG` and defaults to [`DEFAULT_FILTER`]. Writes
/// happen on a background thread; keep the returned guard alive until exit
/// so buffered lines are flushed.
///
/// # Example
///
/// ```no_run
/// let _guard = picklist_core::logging::log_to_file("picklist.log").unwrap();
/// tracing::info!("started");
/// ```
pub fn log_to_file(path: impl AsRef<Path>) -> Result<WorkerGuard, LoggingError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::NoFileName(path.display().to_string()))?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_without_file_name() {
        let err = log_to_file("..").unwrap_err();
        assert!(matches!(err, LoggingError::NoFileName(_)));
    }
}
