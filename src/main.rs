use clap::Parser;
use movepump_watcher::{
    arguments::{render_redacted_config, Args},
    config::{apply_env_overrides, load_config_from_path, Config, ENV_BOT_TOKEN, ENV_CHAT_ID},
    errors::RunError,
    logger::{self, LogLevel, LogTag, LoggerConfig},
    notifications::TelegramNotifier,
    paths,
    ranking::RankingClient,
    run::{run_once, RunContext},
};
use std::path::Path;

/// Main entry point for the MovePump watcher
///
/// Performs exactly one pass and exits:
/// - 0 when the pass completed (including "no data" and "nothing new")
/// - 1 on configuration, state or precondition errors
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Environment credentials may live in a .env file next to the binary
    dotenv::dotenv().ok();

    // Console logging from flags only, until the config file is known
    logger::init(args.startup_logger_config(), None);

    let exit_code = match execute(&args).await {
        Ok(()) => 0,
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ {}", e));
            1
        }
    };

    logger::flush();
    std::process::exit(exit_code);
}

async fn execute(args: &Args) -> Result<(), RunError> {
    let data_dir = args.data_dir.as_deref();
    let config = load_effective_config(args, data_dir)?;

    if args.print_config {
        let rendered = render_redacted_config(&config)
            .map_err(|e| RunError::Precondition(format!("cannot render config: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    init_logging(args, &config, data_dir);
    logger::info(LogTag::System, "🚀 MovePump watcher starting");

    if !config.has_telegram_credentials() {
        if config.telegram.require_credentials {
            return Err(RunError::Precondition(format!(
                "{} and {} must be set",
                ENV_BOT_TOKEN, ENV_CHAT_ID
            )));
        }
        logger::warning(
            LogTag::Notifier,
            &format!(
                "{} / {} not set, notifications will fail",
                ENV_BOT_TOKEN, ENV_CHAT_ID
            ),
        );
    }

    let source = RankingClient::new(&config.ranking)
        .map_err(|e| RunError::Precondition(e.to_string()))?;
    let sink = TelegramNotifier::new(&config.telegram)
        .map_err(|e| RunError::Precondition(e.to_string()))?;

    let ctx = RunContext::from_config(&config, data_dir);
    logger::debug(
        LogTag::System,
        &format!(
            "Threshold {:.2}%, state file '{}'",
            ctx.threshold,
            ctx.state_path.display()
        ),
    );

    let report = run_once(&ctx, &source, &sink).await?;
    if let Some(summary) = report.summary() {
        logger::info(LogTag::System, &format!("✅ {}", summary));
    }

    Ok(())
}

/// Config file, then environment, then command-line flags
fn load_effective_config(args: &Args, data_dir: Option<&Path>) -> Result<Config, RunError> {
    let config_path = paths::get_config_path(data_dir, args.config.as_deref());
    let mut config = load_config_from_path(&config_path)?;
    apply_env_overrides(&mut config);
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Re-initialize the logger with the `[logging]` section merged in
fn init_logging(args: &Args, config: &Config, data_dir: Option<&Path>) {
    let mut debug_keys = args.debug_keys();
    debug_keys.extend(config.logging.debug_tags.iter().cloned());

    let mut logger_config = LoggerConfig::from_flags(args.quiet, args.verbose, &debug_keys);
    match LogLevel::from_str(&config.logging.level) {
        Some(level) if level <= LogLevel::Info => logger_config.min_level = level,
        _ => logger::warning(
            LogTag::Config,
            &format!(
                "Unsupported logging.level '{}', using info",
                config.logging.level
            ),
        ),
    }

    let log_file = config
        .logging
        .file
        .as_deref()
        .map(|file| paths::resolve(data_dir, file));

    logger::init(logger_config, log_file.as_deref());
}
