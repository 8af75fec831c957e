#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_positive_number, validate_required_field, validate_url, Validate,
};
use std::fmt;
use std::time::Duration;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_BASE: &str = crate::adapters::telegram::DEFAULT_API_BASE;
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings, fixed for the life of the process.
#[derive(Clone)]
pub struct BotSettings {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub api_endpoint: String,
    pub telegram_api_base: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl BotSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let practicum_token = validate_required_field("PRACTICUM_TOKEN", config.practicum_token())?;
        let telegram_token = validate_required_field("TELEGRAM_TOKEN", config.telegram_token())?;
        let telegram_chat_id =
            validate_required_field("TELEGRAM_CHAT_ID", config.telegram_chat_id())?;

        validate_url("practicum.endpoint", config.api_endpoint())?;
        validate_url("telegram.api_base", config.telegram_api_base())?;
        validate_positive_number(
            "polling.retry_period_seconds",
            config.retry_period().as_secs(),
            1,
        )?;
        validate_positive_number(
            "practicum.timeout_seconds",
            config.request_timeout().as_secs(),
            1,
        )?;

        Ok(Self {
            practicum_token: practicum_token.to_string(),
            telegram_token: telegram_token.to_string(),
            telegram_chat_id: telegram_chat_id.to_string(),
            api_endpoint: config.api_endpoint().to_string(),
            telegram_api_base: config.telegram_api_base().to_string(),
            retry_period: config.retry_period(),
            request_timeout: config.request_timeout(),
        })
    }
}

/// Validates a settings source and resolves it.
pub fn load_validated<C: ConfigProvider + Validate + ?Sized>(config: &C) -> Result<BotSettings> {
    config.validate()?;
    BotSettings::from_provider(config)
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSettings")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("api_endpoint", &self.api_endpoint)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BotError;

    struct StaticConfig {
        practicum_token: Option<&'static str>,
        telegram_token: Option<&'static str>,
        chat_id: Option<&'static str>,
        endpoint: &'static str,
        retry_secs: u64,
    }

    impl Default for StaticConfig {
        fn default() -> Self {
            Self {
                practicum_token: Some("p"),
                telegram_token: Some("t"),
                chat_id: Some("42"),
                endpoint: DEFAULT_ENDPOINT,
                retry_secs: 600,
            }
        }
    }

    impl ConfigProvider for StaticConfig {
        fn practicum_token(&self) -> Option<&str> {
            self.practicum_token
        }
        fn telegram_token(&self) -> Option<&str> {
            self.telegram_token
        }
        fn telegram_chat_id(&self) -> Option<&str> {
            self.chat_id
        }
        fn api_endpoint(&self) -> &str {
            self.endpoint
        }
        fn telegram_api_base(&self) -> &str {
            DEFAULT_TELEGRAM_API_BASE
        }
        fn retry_period(&self) -> Duration {
            Duration::from_secs(self.retry_secs)
        }
        fn request_timeout(&self) -> Duration {
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        }
    }

    #[test]
    fn test_resolves_complete_config() {
        let settings = BotSettings::from_provider(&StaticConfig::default()).unwrap();
        assert_eq!(settings.telegram_chat_id, "42");
        assert_eq!(settings.retry_period, Duration::from_secs(600));
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let config = StaticConfig {
            telegram_token: None,
            ..Default::default()
        };
        let err = BotSettings::from_provider(&config).unwrap_err();
        assert!(matches!(
            &err,
            BotError::MissingConfigError { field } if field == "TELEGRAM_TOKEN"
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_rejects_bad_endpoint_and_zero_period() {
        let config = StaticConfig {
            endpoint: "not a url",
            ..Default::default()
        };
        assert!(BotSettings::from_provider(&config).is_err());

        let config = StaticConfig {
            retry_secs: 0,
            ..Default::default()
        };
        assert!(BotSettings::from_provider(&config).is_err());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let settings = BotSettings::from_provider(&StaticConfig {
            practicum_token: Some("very-secret"),
            ..Default::default()
        })
        .unwrap();
        assert!(!format!("{:?}", settings).contains("very-secret"));
    }
}
