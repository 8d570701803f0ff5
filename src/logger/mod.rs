//! Tagged logging for the watcher
//!
//! Small structured logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Colored console output plus optional plain-text file output
//!
//! ## Usage
//!
//! ```rust
//! use movepump_watcher::logger::{self, LogTag};
//!
//! logger::error(LogTag::Fetcher, "Upstream request failed");
//! logger::warning(LogTag::Filter, "Payload has no data key");
//! logger::info(LogTag::System, "Run finished");
//! logger::debug(LogTag::Notifier, "Payload: ..."); // Only with --debug-notifier
//! logger::verbose(LogTag::Fetcher, "Raw body: ..."); // Only with --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after arguments are parsed:
//! ```rust,ignore
//! logger::init(LoggerConfig::default(), None);
//! ```
//! Logging before `init` works with the default configuration (console only).

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

use std::path::Path;

/// Initialize the logger
///
/// Installs the filtering configuration and, when `log_file` is given,
/// opens it in append mode. A log file that cannot be opened is reported on
/// stderr and logging continues on the console only.
pub fn init(config: LoggerConfig, log_file: Option<&Path>) {
    set_logger_config(config);

    if let Some(path) = log_file {
        if let Err(e) = file::init_file_logging(path) {
            eprintln!(
                "⚠️  Failed to open log file '{}': {} (console logging only)",
                path.display(),
                e
            );
        }
    }
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
///
/// Info logs are shown by default and represent normal operation.
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the --debug-<tag> flag for this tag is provided.
///
/// # Example
/// ```rust
/// use movepump_watcher::logger::{self, LogTag};
///
/// // Only shown with --debug-fetcher
/// logger::debug(LogTag::Fetcher, "Request headers: {...}");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending file writes
pub fn flush() {
    file::flush_file_logging();
}
