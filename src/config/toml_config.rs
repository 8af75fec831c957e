use crate::config::{
    BotSettings, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_PERIOD_SECS,
    DEFAULT_TELEGRAM_API_BASE,
};
use crate::core::ConfigProvider;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub practicum: PracticumSection,
    #[serde(default)]
    pub telegram: TelegramSection,
    pub polling: Option<PollingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticumSection {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramSection {
    pub token: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_id: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollingSection {
    pub retry_period_seconds: Option<u64>,
}

// Chat ids are numbers in Telegram, so both `chat_id = 42` and `"42"` are accepted.
fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// A placeholder that survived substitution counts as unset.
fn resolved(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.contains("${"))
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown names in place.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn practicum_token(&self) -> Option<&str> {
        resolved(&self.practicum.token)
    }

    fn telegram_token(&self) -> Option<&str> {
        resolved(&self.telegram.token)
    }

    fn telegram_chat_id(&self) -> Option<&str> {
        resolved(&self.telegram.chat_id)
    }

    fn api_endpoint(&self) -> &str {
        self.practicum.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn telegram_api_base(&self) -> &str {
        self.telegram
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_API_BASE)
    }

    fn retry_period(&self) -> Duration {
        let secs = self
            .polling
            .as_ref()
            .and_then(|p| p.retry_period_seconds)
            .unwrap_or(DEFAULT_RETRY_PERIOD_SECS);
        Duration::from_secs(secs)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.practicum
                .timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Name of the first `${VAR}` left in `value`.
fn placeholder_name(value: &Option<String>) -> Option<&str> {
    let rest = value.as_deref()?.split_once("${")?.1;
    rest.split_once('}').map(|(name, _)| name)
}

impl Validate for TomlConfig {
    /// Names the unset environment variable behind a required secret, then
    /// runs the common settings checks.
    fn validate(&self) -> Result<()> {
        let secrets = [
            &self.practicum.token,
            &self.telegram.token,
            &self.telegram.chat_id,
        ];
        if let Some(name) = secrets.into_iter().find_map(placeholder_name) {
            return Err(BotError::MissingConfigError {
                field: name.to_string(),
            });
        }

        BotSettings::from_provider(self).map(|_| ())
    }
}
