//! Configuration utilities - loading, environment overrides and validation

use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Environment variable holding the Telegram bot token
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the destination chat id
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Load configuration from a TOML file
///
/// A missing file is not an error: defaults are used and a warning is
/// logged. Any key omitted from the file keeps its default.
///
/// # Returns
/// - `Ok(Config)` - Parsed (or default) configuration
/// - `Err(ConfigError)` - File exists but cannot be read or parsed
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!(
                "Config file '{}' not found, using default values",
                path.display()
            ),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str::<Config>(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    logger::debug(
        LogTag::Config,
        &format!("Loaded configuration from '{}'", path.display()),
    );

    Ok(config)
}

/// Apply credential overrides from the process environment
pub fn apply_env_overrides(config: &mut Config) {
    apply_env_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply credential overrides using a custom variable lookup
///
/// Non-empty environment values win over values from the config file.
pub fn apply_env_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(ENV_BOT_TOKEN).filter(|v| !v.trim().is_empty()) {
        config.telegram.bot_token = token.trim().to_string();
    }

    if let Some(chat_id) = lookup(ENV_CHAT_ID).filter(|v| !v.trim().is_empty()) {
        config.telegram.chat_id = chat_id.trim().to_string();
    }
}

impl Config {
    /// Reject values that would make a run meaningless or hang
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.filter.progress_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "filter.progress_threshold",
                reason: format!("must be a non-negative number, got {}", threshold),
            });
        }

        if self.ranking.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "ranking.page_size",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.ranking.payload_marker.is_empty() {
            return Err(ConfigError::Invalid {
                field: "ranking.payload_marker",
                reason: "must not be empty".to_string(),
            });
        }

        let timeouts = [
            ("ranking.timeout_secs", self.ranking.timeout_secs),
            ("ranking.connect_timeout_secs", self.ranking.connect_timeout_secs),
            ("telegram.timeout_secs", self.telegram.timeout_secs),
            ("telegram.connect_timeout_secs", self.telegram.connect_timeout_secs),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "timeout must be at least one second".to_string(),
                });
            }
        }

        if self.state.path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "state.path",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// True when both Telegram credentials are present
    pub fn has_telegram_credentials(&self) -> bool {
        !self.telegram.bot_token.is_empty() && !self.telegram.chat_id.is_empty()
    }
}
