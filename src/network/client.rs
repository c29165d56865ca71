//! HTTP client shared by all provider calls
//!
//! One pooled `reqwest::Client` is built at startup and injected everywhere;
//! provider adapters never construct their own transport.

use crate::providers::{HttpMethod, ProviderRequest, ProviderResponse, RequestBody};
use anyhow::Result;
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("websearch-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with shared connection pooling
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(crate::DEFAULT_TIMEOUT))
    }

    /// Create a new client with a custom default timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Execute a provider request under the client's default timeout
    pub async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a provider request under a specific timeout, overriding the
    /// client default. Callers with a per-provider bound use this so the
    /// configured timeout is never capped by the client's own.
    pub async fn execute_with_timeout(
        &self,
        request: ProviderRequest,
        timeout: Duration,
    ) -> Result<ProviderResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        builder = builder
            .timeout(timeout)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/html;q=0.9, */*;q=0.8");

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        if let Some(body) = request.body {
            builder = match body {
                RequestBody::Form(data) => builder.form(&data),
                RequestBody::Json(json) => builder.json(&json),
            };
        }

        let response = builder.send().await?;
        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<ProviderResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ProviderResponse { status, text, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpClient::new().is_ok());
    }
}
