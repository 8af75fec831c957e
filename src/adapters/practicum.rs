use crate::core::StatusApi;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Client for the Practicum homework status endpoint.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
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
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(BotError::from_transport)?;

        tracing::debug!("API response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(BotError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(BotError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| BotError::InvalidJson {
            message: e.to_string(),
        })
    }
}
