//! # Local Logger
//!
//! Installs the process-wide `tracing` subscriber: a colored console layer and
//! a plain-text file layer written through a non-blocking appender.
//!
//! Each run writes to `{app_name}-{YYYYmmdd_HHMMSS}.log` inside the log
//! directory. Older files of the same app are rotated away so only the most
//! recent previous run is kept next to the current one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use glob::glob;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps a configured level name to a `tracing` filter directive.
///
/// Accepts `trace`, `debug`, `info`, `warn`, `error` and `fatal` (treated as
/// `error`) in any case. Anything else falls back to `info`.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "fatal" => "error",
        _ => "info",
    }
}

/// Deletes all but the `keep` newest log files of `app_name` in `log_dir`.
///
/// File names embed a sortable timestamp, so "newest" is decided by name.
/// Returns the paths that were removed.
pub fn rotate_logs(app_name: &str, log_dir: &Path, keep: usize) -> Vec<PathBuf> {
    let pattern = format!("{}/{}-*.log", log_dir.display(), app_name);
    let mut log_files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(e) => {
            eprintln!("Invalid log rotation pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    // Newest first.
    log_files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let mut removed = Vec::new();
    for old_file in log_files.into_iter().skip(keep) {
        match fs::remove_file(&old_file) {
            Ok(()) => removed.push(old_file),
            Err(e) => eprintln!("Error deleting old log file {}: {}", old_file.display(), e),
        }
    }
    removed
}

/// Installs the global subscriber for `app_name`.
///
/// `RUST_LOG` takes precedence over `log_level` when set. The returned guard
/// flushes the file writer on drop and must be held for the life of the
/// process.
///
/// # Errors
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn setup_logging(log_dir: &Path, app_name: &str, log_level: &str) -> anyhow::Result<WorkerGuard> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    }

    rotate_logs(app_name, log_dir, 1);

    let file_name = format!("{}-{}.log", app_name, Local::now().format("%Y%m%d_%H%M%S"));
    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_map_to_directives() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("fatal"), "error");
        assert_eq!(level_directive(" Warn "), "warn");
        assert_eq!(level_directive("silly"), "info");
    }

    #[test]
    fn rotation_keeps_newest_of_the_same_app() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "server_dashboard-20260101_080000.log",
            "server_dashboard-20260102_080000.log",
            "server_dashboard-20260103_080000.log",
            "other_app-20250101_000000.log",
        ] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let removed = rotate_logs("server_dashboard", dir.path(), 1);
        assert_eq!(removed.len(), 2);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec!["other_app-20250101_000000.log", "server_dashboard-20260103_080000.log"]
        );
    }

    #[test]
    fn rotation_on_empty_directory_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        assert!(rotate_logs("server_dashboard", dir.path(), 1).is_empty());
    }
}
