use crate::core::Notifier;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramNotifier {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::ConfigValidationError {
                field: "http_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

fn delivery_error(err: impl std::fmt::Display) -> BotError {
    BotError::Delivery {
        message: err.to_string(),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // reqwest puts the URL (and so the bot token) into its errors
            .map_err(|e| delivery_error(e.without_url()))?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(delivery_error(format!(
                "Telegram answered {}: {}",
                status,
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(delivery_error(format!("Telegram answered {}", status))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn notifier_for(server: &MockServer) -> TelegramNotifier {
        TelegramNotifier::new(server.base_url(), "123:ABC", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_chat_and_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/bot123:ABC/sendMessage")
                .json_body(json!({"chat_id": "42", "text": "hello"}));
            then.status(200)
                .json_body(json!({"ok": true, "result": {"message_id": 1}}));
        });

        tokio_test::assert_ok!(notifier_for(&server).send("42", "hello").await);
        mock.assert();
    }

    #[tokio::test]
    async fn test_rejected_message_is_delivery_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:ABC/sendMessage");
            then.status(400)
                .json_body(json!({
                    "ok": false,
                    "error_code": 400,
                    "description": "Bad Request: chat not found"
                }));
        });

        let err = notifier_for(&server).send("42", "hello").await.unwrap_err();
        match err {
            BotError::Delivery { message } => assert!(message.contains("chat not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_answer_is_delivery_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:ABC/sendMessage");
            then.status(502).body("Bad Gateway");
        });

        let err = notifier_for(&server).send("42", "hello").await.unwrap_err();
        assert!(matches!(err, BotError::Delivery { .. }));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_is_ignored() {
        let notifier =
            TelegramNotifier::new("https://api.telegram.org/", "T", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/botT/sendMessage"
        );
    }
}
