//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the user agent and session cookies
//! - Waiting on the rate limiter before every request
//! - Turning non-success statuses and transport failures into `FetchError`
//!
//! There are no retries here; a failed pin is skipped by the coordinator.

use crate::config::CrawlerConfig;
use crate::crawler::scheduler::RateLimiter;
use crate::FetchError;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - Crawler settings (user agent and timeout)
/// * `cookies` - Session cookies attached to every request, if any
pub fn build_http_client(
    config: &CrawlerConfig,
    cookies: Option<Arc<Jar>>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .gzip(true)
        .brotli(true);

    if let Some(jar) = cookies {
        builder = builder.cookie_provider(jar);
    }

    builder.build()
}

/// Rate-limited page fetcher
///
/// Issues one request at a time. The only state it carries is the limiter's
/// clock.
pub struct Fetcher {
    client: Client,
    limiter: RateLimiter,
}

impl Fetcher {
    pub fn new(client: Client, limiter: RateLimiter) -> Self {
        Self { client, limiter }
    }

    /// Creates a fetcher from crawler settings
    pub fn from_config(
        config: &CrawlerConfig,
        cookies: Option<Arc<Jar>>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config, cookies)?;
        Ok(Self::new(client, RateLimiter::from_rps(config.effective_rps())))
    }

    /// Fetches a page body
    ///
    /// Waits for the rate limiter, then issues a GET. Any 2xx or 3xx final
    /// status is a success.
    ///
    /// # Errors
    ///
    /// * `FetchError::Status` - The server answered with 4xx or 5xx
    /// * `FetchError::Timeout` - The request exceeded the configured timeout
    /// * `FetchError::Transport` - Connection, TLS or body read failure
    pub async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        self.limiter.acquire().await;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
