use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote homework status API.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Returns the raw payload of statuses changed since `since` (unix seconds).
    async fn fetch(&self, since: i64) -> Result<serde_json::Value>;
}

/// Outbound message channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn practicum_token(&self) -> Option<&str>;
    fn telegram_token(&self) -> Option<&str>;
    fn telegram_chat_id(&self) -> Option<&str>;
    fn api_endpoint(&self) -> &str;
    fn telegram_api_base(&self) -> &str;
    fn retry_period(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}
