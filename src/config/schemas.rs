//! Configuration schemas - every section defined once with its defaults
//!
//! Defaults reproduce the observed upstream request and the Telegram Bot
//! API, so an empty (or missing) config.toml yields a working setup once
//! credentials are provided through the environment.

use crate::paths;

/// Browser user agent sent to the ranking endpoint
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0";

// ============================================================================
// RANKING SOURCE
// ============================================================================

config_struct! {
    /// Upstream ranking endpoint and request shape
    pub struct RankingConfig {
        url: String = "https://movepump.com/ranking".to_string(),
        /// Server action identifier sent as the `next-action` header
        action_id: String = "04ee47b34d62e8aeacb861b976bb67d69dd7ce34".to_string(),
        user_agent: String = DEFAULT_USER_AGENT.to_string(),
        page: u32 = 1,
        page_size: u32 = 15,
        sort: String = "real_sui_reverse:desc".to_string(),
        search: String = String::new(),
        /// Line marker in front of the embedded JSON payload
        payload_marker: String = "1".to_string(),
        connect_timeout_secs: u64 = 10,
        timeout_secs: u64 = 30,
    }
}

// ============================================================================
// FILTER
// ============================================================================

config_struct! {
    pub struct FilterConfig {
        /// Projects must have progress_buy strictly above this percentage
        progress_threshold: f64 = 80.0,
    }
}

// ============================================================================
// TELEGRAM
// ============================================================================

config_struct! {
    /// Telegram Bot API delivery settings
    ///
    /// `bot_token` and `chat_id` are normally left empty here and supplied
    /// through TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID.
    pub struct TelegramConfig {
        api_base: String = "https://api.telegram.org".to_string(),
        bot_token: String = String::new(),
        chat_id: String = String::new(),
        disable_web_page_preview: bool = false,
        /// Abort before any I/O when credentials are missing
        require_credentials: bool = false,
        connect_timeout_secs: u64 = 10,
        timeout_secs: u64 = 30,
    }
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

config_struct! {
    pub struct NotificationsConfig {
        /// Mark a project seen even when its message could not be delivered
        mark_seen_on_failure: bool = true,
        /// Detail page prefix, the project's coin_type is appended
        detail_url_base: String = "https://movepump.com/token".to_string(),
    }
}

// ============================================================================
// STATE
// ============================================================================

config_struct! {
    pub struct StateConfig {
        /// Seen-set file, relative paths resolve against --data-dir
        path: String = paths::DEFAULT_STATE_FILE.to_string(),
    }
}

// ============================================================================
// LOGGING
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        /// Optional log file, relative paths resolve against --data-dir
        file: Option<String> = None,
        /// "info" or "warning"
        level: String = "info".to_string(),
        /// Tags with debug output enabled in addition to --debug-<tag> flags
        debug_tags: Vec<String> = Vec::new(),
    }
}

// ============================================================================
// MAIN CONFIGURATION
// ============================================================================

config_struct! {
    /// Main configuration structure
    pub struct Config {
        ranking: RankingConfig = RankingConfig::default(),
        filter: FilterConfig = FilterConfig::default(),
        telegram: TelegramConfig = TelegramConfig::default(),
        notifications: NotificationsConfig = NotificationsConfig::default(),
        state: StateConfig = StateConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
