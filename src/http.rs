//! Thin request layer shared by both clients

use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::rate_limit::RateLimiter;

pub(crate) const JSON: &str = "application/json";
pub(crate) const TEXT: &str = "text/plain";

#[derive(Clone)]
pub(crate) struct HttpClient {
    client: Client,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    pub(crate) fn from_config(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Falling back to default HTTP client");
                Client::new()
            });

        Self::with_client(client, config)
    }

    pub(crate) fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            rate_limiter: config.create_rate_limiter(),
        }
    }

    /// GET `url` declaring `accept`, failing on non-success status
    pub(crate) async fn get(&self, url: &str, accept: &str) -> Result<Response> {
        self.pace().await?;
        debug!(url, accept, "Making GET request");
        let response = self.client.get(url).header(ACCEPT, accept).send().await?;
        ensure_success(response)
    }

    /// POST a JSON document to `url`, failing on non-success status
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response> {
        self.pace().await?;
        debug!(url, "Making POST request");
        let response = self
            .client
            .post(url)
            .header(ACCEPT, JSON)
            .json(body)
            .send()
            .await?;
        ensure_success(response)
    }

    async fn pace(&self) -> Result<()> {
        match &self.rate_limiter {
            Some(limiter) => limiter.acquire().await,
            None => Ok(()),
        }
    }
}

/// Decode a JSON body, tagging undecodable payloads as [`ClientError::JsonError`]
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    debug!(status = status.as_u16(), "Request returned non-success status");
    Err(ClientError::ApiError {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    })
}
