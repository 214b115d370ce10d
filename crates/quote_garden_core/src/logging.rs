//! Native logging bootstrap and level policy.
//!
//! # Responsibility
//! - Start rolling file logs once per process for native hosts.
//! - Keep log payloads to metadata; quote and journal text is never logged.
//!
//! # Invariants
//! - Initialization is idempotent for the same level and directory.
//! - Reconfiguration with a different level or directory is rejected.
//! - Initialization never panics.

use std::path::{Path, PathBuf};

#[cfg(feature = "file-logging")]
pub use file::{init_logging, logging_status};

#[cfg_attr(not(feature = "file-logging"), allow(dead_code))]
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Maps user input onto one of `trace|debug|info|warn|error`.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

#[cfg_attr(not(feature = "file-logging"), allow(dead_code))]
fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

/// Flattens newlines and caps length so panic text stays on one log line.
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    if flattened.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(feature = "file-logging")]
mod file {
    use super::{normalize_level, normalize_log_dir, sanitize_message, MAX_PANIC_PAYLOAD_CHARS};
    use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
    use log::{error, info};
    use once_cell::sync::OnceCell;
    use std::path::{Path, PathBuf};

    const LOG_FILE_BASENAME: &str = "quote_garden";
    const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    const MAX_LOG_FILES: usize = 3;

    static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

    struct LoggingState {
        level: &'static str,
        log_dir: PathBuf,
        _logger: LoggerHandle,
    }

    /// Starts file logging under `log_dir` (absolute) at `level`.
    ///
    /// # Errors
    /// - Unsupported level, empty/relative directory, or backend failure.
    /// - A previous call configured a different level or directory.
    pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
        let level = normalize_level(level)?;
        let log_dir = normalize_log_dir(log_dir)?;

        let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, &log_dir))?;

        if state.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                state.log_dir.display(),
                log_dir.display()
            ));
        }
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{level}`",
                state.level
            ));
        }
        Ok(())
    }

    /// `(level, log_dir)` of the active logger, if any.
    pub fn logging_status() -> Option<(&'static str, PathBuf)> {
        LOGGING_STATE
            .get()
            .map(|state| (state.level, state.log_dir.clone()))
    }

    fn start_logger(level: &'static str, log_dir: &Path) -> Result<LoggingState, String> {
        std::fs::create_dir_all(log_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            )
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook();
        info!(
            "event=core_init module=logging status=ok level={level} platform={} version={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            _logger: logger,
        })
    }

    // Runs once: only reachable from the `LOGGING_STATE` initializer.
    fn install_panic_hook() {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            error!(
                "event=panic_captured module=logging status=error location={location} payload={}",
                sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
            );
            previous_hook(panic_info);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, normalize_log_dir, sanitize_message};

    #[test]
    fn normalize_level_accepts_aliases() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute() {
        let error = normalize_log_dir("logs").expect_err("relative dir must fail");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn sanitize_flattens_and_truncates() {
        let sanitized = sanitize_message("a\nb\rc", 3);
        assert_eq!(sanitized, "a b...");
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        use super::{init_logging, logging_status};

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let first_dir = first.path().to_str().unwrap().to_string();
        let second_dir = second.path().to_str().unwrap().to_string();

        init_logging("info", &first_dir).expect("first init");
        init_logging("INFO", &first_dir).expect("same config is idempotent");

        let err = init_logging("debug", &first_dir).expect_err("level change must fail");
        assert!(err.contains("refusing to switch"));
        let err = init_logging("info", &second_dir).expect_err("dir change must fail");
        assert!(err.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
