//! File-based logging for the TUI.
//!
//! The terminal is owned by ratatui, so log output goes to a daily-rolling
//! file under the platform data directory. `log` macro calls throughout the
//! crate are bridged into `tracing` via `tracing-log`. The returned guard
//! must be held for the lifetime of the process or buffered lines are lost.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging. Returns `None` when setup fails (the app still
/// runs, just silently).
pub fn init() -> Option<WorkerGuard> {
    let log_dir = log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log dir {}: {e}", log_dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&log_dir, "imptrack.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();

    // A second init (e.g. in tests) leaves the first subscriber in place.
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return None;
    }
    let _ = tracing_log::LogTracer::init();

    Some(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("imptrack").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_non_empty_path() {
        let dir = log_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
