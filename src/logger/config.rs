//! Logger configuration and global access
//!
//! The configuration is built from command-line flags and the `[logging]`
//! config section in main.rs and installed once via `logger::init`.

use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest of Error/Warning/Info that is displayed (Error always is)
    pub min_level: LogLevel,
    /// Global --verbose: every tag emits debug and verbose output
    pub verbose: bool,
    /// Tags with debug output enabled
    pub debug_tags: HashSet<LogTag>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            verbose: false,
            debug_tags: HashSet::new(),
        }
    }
}

impl LoggerConfig {
    /// Build from the parsed flags
    ///
    /// Unknown debug keys are ignored.
    pub fn from_flags(quiet: bool, verbose: bool, debug_keys: &[String]) -> Self {
        let debug_tags: HashSet<LogTag> = debug_keys
            .iter()
            .filter_map(|k| LogTag::from_debug_key(k))
            .collect();

        let min_level = if quiet {
            LogLevel::Warning
        } else {
            LogLevel::Info
        };

        Self {
            min_level,
            verbose,
            debug_tags,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(cfg) => cfg.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut cfg) => *cfg = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

pub(super) fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.verbose || config.debug_tags.contains(tag)
}

pub(super) fn is_verbose_enabled() -> bool {
    get_logger_config().verbose
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_defaults_to_info() {
        let cfg = LoggerConfig::from_flags(false, false, &[]);
        assert_eq!(cfg.min_level, LogLevel::Info);
        assert!(cfg.debug_tags.is_empty());
    }

    #[test]
    fn test_from_flags_debug_tags() {
        let keys = vec!["fetcher".to_string(), "bogus".to_string()];
        let cfg = LoggerConfig::from_flags(false, false, &keys);
        assert_eq!(cfg.min_level, LogLevel::Info);
        assert!(cfg.debug_tags.contains(&LogTag::Fetcher));
        assert_eq!(cfg.debug_tags.len(), 1);
    }

    #[test]
    fn test_quiet_raises_threshold() {
        let cfg = LoggerConfig::from_flags(true, true, &[]);
        assert_eq!(cfg.min_level, LogLevel::Warning);
        assert!(cfg.verbose);
    }
}
