use crate::config::{
    BotSettings, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_PERIOD_SECS,
    DEFAULT_TELEGRAM_API_BASE,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "homework-status-bot")]
#[command(about = "Relays homework review status changes to Telegram")]
pub struct CliConfig {
    /// OAuth token for the homework status API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives the notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    /// Seconds between two polls
    #[arg(long, env = "RETRY_PERIOD", default_value_t = DEFAULT_RETRY_PERIOD_SECS)]
    pub retry_period: u64,

    /// Seconds before an API request is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Load settings from a TOML file instead of flags and environment
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn practicum_token(&self) -> Option<&str> {
        self.practicum_token.as_deref()
    }

    fn telegram_token(&self) -> Option<&str> {
        self.telegram_token.as_deref()
    }

    fn telegram_chat_id(&self) -> Option<&str> {
        self.telegram_chat_id.as_deref()
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn telegram_api_base(&self) -> &str {
        &self.telegram_api_base
    }

    fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        BotSettings::from_provider(self).map(|_| ())
    }
}
