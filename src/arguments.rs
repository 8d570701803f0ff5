/// Command-line arguments for the watcher
///
/// Flags override the matching config.toml values; `--debug-<tag>` flags
/// enable debug output for a single log tag.
use crate::config::Config;
use crate::logger::{LogLevel, LogTag, LoggerConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "movepump-watcher")]
#[command(about = "Announce MovePump projects crossing a buy-progress threshold on Telegram", long_about = None)]
pub struct Args {
    /// Configuration file (default: <data-dir>/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory that relative state, config and log paths resolve against
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seen-set file, overrides state.path
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<String>,

    /// Buy progress percentage a project must exceed
    #[arg(long, value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Append log output to this file, overrides logging.file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug and verbose output for every tag
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration (credentials redacted) and exit
    #[arg(long)]
    pub print_config: bool,

    #[arg(long)]
    pub debug_system: bool,

    #[arg(long)]
    pub debug_config: bool,

    #[arg(long)]
    pub debug_state: bool,

    #[arg(long)]
    pub debug_fetcher: bool,

    #[arg(long)]
    pub debug_filter: bool,

    #[arg(long)]
    pub debug_notifier: bool,
}

impl Args {
    /// Debug keys of every `--debug-<tag>` flag that was passed
    pub fn debug_keys(&self) -> Vec<String> {
        let flags = [
            (LogTag::System, self.debug_system),
            (LogTag::Config, self.debug_config),
            (LogTag::State, self.debug_state),
            (LogTag::Fetcher, self.debug_fetcher),
            (LogTag::Filter, self.debug_filter),
            (LogTag::Notifier, self.debug_notifier),
        ];

        flags
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(tag, _)| tag.to_debug_key().to_string())
            .collect()
    }

    /// Logger settings used before the config file is read
    ///
    /// `--print-config` writes TOML to stdout, so everything below errors is
    /// suppressed to keep the output parseable.
    pub fn startup_logger_config(&self) -> LoggerConfig {
        if self.print_config {
            return LoggerConfig {
                min_level: LogLevel::Error,
                ..LoggerConfig::default()
            };
        }
        LoggerConfig::from_flags(self.quiet, self.verbose, &self.debug_keys())
    }

    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(threshold) = self.threshold {
            config.filter.progress_threshold = threshold;
        }
        if let Some(state_file) = &self.state_file {
            config.state.path = state_file.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
        if self.quiet {
            config.logging.level = "warning".to_string();
        }
    }
}

/// Render the configuration as TOML with the bot token masked
pub fn render_redacted_config(config: &Config) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if !shown.telegram.bot_token.is_empty() {
        shown.telegram.bot_token = "***".to_string();
    }
    toml::to_string_pretty(&shown)
}
