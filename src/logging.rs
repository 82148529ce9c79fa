//! Logging setup for RecBar.
//!
//! Library code logs through the `log` facade. `init_logging` installs
//! `env_logger` with a local-time line format, optionally writing to a
//! daily log file with cleanup of old files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::RecBarResult;

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

const LOG_FILE_PREFIX: &str = "recbar_";

/// Initialize the logging system.
///
/// Honours `RUST_LOG` (default `info`). With `log_dir`, output goes to
/// `recbar_YYYY-MM-DD.log` in that directory instead of stderr. Calling
/// this more than once keeps the first logger.
pub fn init_logging(log_dir: Option<&Path>) -> RecBarResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    builder.format(|buf, record| {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        writeln!(
            buf,
            "[{}] [{}] [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(current_log_path(dir))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        cleanup_old_logs(dir);
    }

    if builder.try_init().is_err() {
        log::debug!("[LOGGING] Logger already initialized");
        return Ok(());
    }

    log::info!("[LOGGING] Logging initialized");
    if let Some(dir) = log_dir {
        log::info!("[LOGGING] Log directory: {:?}", dir);
    }
    Ok(())
}

/// Per-user log directory
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("recbar").join("logs"))
}

/// Get the path for the current log file (one per day)
fn current_log_path(log_dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    log_dir.join(format!("{}{}.log", LOG_FILE_PREFIX, date))
}

fn is_own_log_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(LOG_FILE_PREFIX))
        .unwrap_or(false);
    has_prefix && path.extension().map(|ext| ext == "log").unwrap_or(false)
}

/// Clean up old recbar log files, keeping only the most recent MAX_LOG_FILES.
/// Other files in the directory are left alone.
fn cleanup_old_logs(log_dir: &Path) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| is_own_log_file(&e.path()))
            .collect();

        // Newest first
        log_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for file in log_files.into_iter().skip(MAX_LOG_FILES) {
            let _ = fs::remove_file(file.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("recbar-logs-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_current_log_path_format() {
        let path = current_log_path(Path::new("/tmp/logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("recbar_"));
        assert!(name.ends_with(".log"));
        // recbar_YYYY-MM-DD.log
        assert_eq!(name.len(), "recbar_".len() + 10 + ".log".len());
    }

    #[test]
    fn test_cleanup_keeps_most_recent() {
        let dir = temp_dir();
        for i in 0..(MAX_LOG_FILES + 3) {
            fs::write(dir.join(format!("recbar_{}.log", i)), "x").unwrap();
        }
        fs::write(dir.join("notes.txt"), "keep").unwrap();
        fs::write(dir.join("host_app.log"), "keep").unwrap();

        cleanup_old_logs(&dir);

        let remaining_logs = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| is_own_log_file(&e.path()))
            .count();
        assert_eq!(remaining_logs, MAX_LOG_FILES);
        assert!(dir.join("notes.txt").exists());
        assert!(dir.join("host_app.log").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_is_own_log_file() {
        assert!(is_own_log_file(Path::new("/logs/recbar_2026-01-02.log")));
        assert!(!is_own_log_file(Path::new("/logs/other.log")));
        assert!(!is_own_log_file(Path::new("/logs/recbar_notes.txt")));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init_logging(None).is_ok());
        assert!(init_logging(None).is_ok());
    }
}
