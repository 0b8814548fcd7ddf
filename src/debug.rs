//! Debug log for the showcase
//!
//! Debug builds append timestamped lines to `showreel-debug.log` in the
//! working directory (or `$SHOWREEL_DEBUG_LOG`). In release builds nothing is
//! written and no message is formatted, `debug_log!` included.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default log file name
pub const LOG_FILE_NAME: &str = "showreel-debug.log";

/// Environment variable overriding the log path
pub const LOG_PATH_ENV: &str = "SHOWREEL_DEBUG_LOG";

static SINK: Mutex<Option<File>> = Mutex::new(None);

/// Where `init` opens the log
pub fn log_path() -> PathBuf {
    std::env::var_os(LOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

/// Open the log at [`log_path`] (debug builds only)
pub fn init() {
    init_at(&log_path());
}

/// Open the log at `path`; a second call keeps the first file
#[cfg(debug_assertions)]
pub fn init_at(path: &Path) {
    let Ok(mut sink) = SINK.lock() else {
        return;
    };
    if sink.is_some() {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    *sink = Some(file);
    drop(sink);
    log("--- showreel session ---");
}

#[cfg(not(debug_assertions))]
pub fn init_at(_path: &Path) {}

/// One log line, `[HH:MM:SS.mmm] message`
pub fn format_line(time: &chrono::DateTime<chrono::Local>, message: &str) -> String {
    format!("[{}] {}\n", time.format("%H:%M:%S%.3f"), message)
}

#[cfg(debug_assertions)]
pub fn log(message: &str) {
    let line = format_line(&chrono::Local::now(), message);
    if let Ok(mut sink) = SINK.lock() {
        if let Some(file) = sink.as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn log(_message: &str) {}

/// `[category] message`
pub fn log_category(category: &str, message: &str) {
    if cfg!(debug_assertions) {
        log(&format!("[{category}] {message}"));
    }
}

/// Store selection change
pub fn log_theme(previous: &str, current: &str, generation: u64) {
    if cfg!(debug_assertions) {
        log(&format!("[theme] {previous} -> {current} (generation {generation})"));
    }
}

/// Curtain phase change of transition `id`
pub fn log_transition(id: u64, from: &str, to: &str) {
    if cfg!(debug_assertions) {
        log(&format!("[transition #{id}] {from} -> {to}"));
    }
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::debug::log(&format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let time = chrono::Local
            .with_ymd_and_hms(2024, 5, 1, 9, 7, 3)
            .single()
            .unwrap();
        assert_eq!(format_line(&time, "hello"), "[09:07:03.000] hello\n");
    }

    #[test]
    fn test_default_log_path() {
        if std::env::var_os(LOG_PATH_ENV).is_none() {
            assert_eq!(log_path(), PathBuf::from(LOG_FILE_NAME));
        }
    }

    #[test]
    fn test_logging_without_init_is_silent() {
        log("nobody listens");
        log_theme("midnight", "crimson", 1);
        log_transition(1, "idle", "engaging");
        crate::debug_log!("value = {}", 42);
    }

    #[test]
    fn test_macro_formats_only_in_debug_builds() {
        let mut formatted = false;
        crate::debug_log!("{}", {
            formatted = true;
            1
        });
        assert_eq!(formatted, cfg!(debug_assertions));
    }
}
