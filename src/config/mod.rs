//! Configuration system
//!
//! Sections are declared with `config_struct!` in `schemas.rs`, loaded from
//! TOML by `utils.rs`, and passed explicitly to the components that need
//! them. Credentials can be overridden from the environment.

#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{
    Config, FilterConfig, LoggingConfig, NotificationsConfig, RankingConfig, StateConfig,
    TelegramConfig, DEFAULT_USER_AGENT,
};
pub use utils::{
    apply_env_overrides, apply_env_overrides_from, load_config_from_path, ENV_BOT_TOKEN,
    ENV_CHAT_ID,
};
