//! HTTP client for making requests to the movie metadata API

use super::request::{ApiRequest, ApiResponse};
use crate::config::OutgoingSettings;
use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}

/// HTTP client wrapper with MovieBook-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout).map_err(|_| {
            anyhow!(
                "outgoing.request_timeout must be a non-negative number of seconds, got {}",
                settings.request_timeout
            )
        })?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent: format!("MovieBook/{}", crate::VERSION),
        })
    }

    /// Execute a GET request
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a GET request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: ApiRequest,
        timeout: Duration,
    ) -> Result<ApiResponse> {
        let response = self
            .client
            .get(request.escaped_url())
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse response into ApiResponse
    async fn parse_response(response: Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("HTTP {} ({} bytes)", status, text.len());

        Ok(ApiResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
