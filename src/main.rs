use anyhow::Context;
use clap::Parser;
use homework_status_bot::config;
use homework_status_bot::utils::logger::{self, LogFormat};
use homework_status_bot::{
    BotSettings, CliConfig, PollLoop, PracticumClient, TelegramNotifier, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(cli.json_logs), cli.verbose);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) if e.is_fatal() => {
            tracing::error!("❌ Configuration error, bot stopped: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Settings: {:?}", settings);

    let api = PracticumClient::new(
        settings.api_endpoint.as_str(),
        settings.practicum_token.as_str(),
        settings.request_timeout,
    )
    .context("cannot build status API client")?;
    let notifier = TelegramNotifier::new(
        settings.telegram_api_base.as_str(),
        settings.telegram_token.as_str(),
        settings.request_timeout,
    )
    .context("cannot build Telegram client")?;

    let mut poll_loop = PollLoop::new(
        api,
        notifier,
        settings.telegram_chat_id.as_str(),
        settings.retry_period,
    );

    tokio::select! {
        _ = poll_loop.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("🛑 Interrupted, stopping");
        }
    }

    Ok(())
}

fn load_settings(cli: &CliConfig) -> homework_status_bot::Result<BotSettings> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)?;
            config::load_validated(&config)
        }
        None => config::load_validated(cli),
    }
}
