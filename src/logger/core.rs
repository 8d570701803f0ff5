//! Core logging implementation with filtering

use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Debug requires --debug-<tag> (or --verbose) for that tag
/// 3. Verbose requires --verbose
/// 4. Warning and Info are compared against the minimum level (--quiet)
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    match level {
        LogLevel::Error => true,
        LogLevel::Debug => is_debug_enabled_for_tag(tag),
        LogLevel::Verbose => is_verbose_enabled(),
        LogLevel::Warning | LogLevel::Info => level <= get_logger_config().min_level,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
