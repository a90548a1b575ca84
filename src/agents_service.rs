use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::IgnoredAny;
use std::time::Duration;
use tracing::debug;

use crate::error::UpstreamError;

/// `/health` gets its own short deadline so a hung upstream cannot stall it.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for the agents service (`/chat`, `/agents`, `/health`).
#[derive(Debug, Clone)]
pub struct AgentsServiceClient {
    client: Client,
    base_url: String,
}

/// A successful (2xx) reply from the agents service.
///
/// `body` holds the upstream bytes as received: valid JSON, or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

impl AgentsServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the caller's JSON bytes to `/chat` untouched.
    pub async fn chat(&self, body: Bytes) -> Result<UpstreamReply, UpstreamError> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::into_reply(response).await
    }

    pub async fn list_agents(&self) -> Result<UpstreamReply, UpstreamError> {
        let url = format!("{}/agents", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::into_reply(response).await
    }

    pub async fn health_check(&self) -> Result<bool, UpstreamError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    async fn into_reply(response: Response) -> Result<UpstreamReply, UpstreamError> {
        let status = response.status();
        debug!("Agents service answered {} for {}", status, response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        if !body.is_empty() {
            serde_json::from_slice::<IgnoredAny>(&body).map_err(UpstreamError::InvalidBody)?;
        }
        Ok(UpstreamReply {
            status: status.as_u16(),
            body,
        })
    }
}
