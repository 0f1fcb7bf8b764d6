//! Rate-limited HTTP client shared by all scrapers
//!
//! This module provides a rate-limited HTTP client that spaces requests
//! to the scraped sites and implements retry logic with exponential
//! backoff for transient errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Error, Result};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart
/// to avoid overwhelming the scraped servers.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Arguments
    /// * `requests_per_second` - Maximum number of requests allowed per second
    ///
    /// # Example
    /// ```
    /// use streamscout_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// This method will wait if necessary to ensure the minimum interval
    /// between requests is respected.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 4.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 4.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client with rate limiting and retry logic
///
/// This client automatically:
/// - Limits request rate to avoid server overload
/// - Retries on transient errors (429, 5xx) with exponential backoff
/// - Sets a browser User-Agent, which several of the scraped sites
///   require before serving real content
pub struct HttpClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(config.requests_per_second);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch the body of a URL as text
    ///
    /// This method handles rate limiting and retries automatically.
    ///
    /// # Arguments
    /// * `url` - Absolute URL to fetch
    ///
    /// # Errors
    /// - `Error::Http` - Network or HTTP error after all retries
    /// - `Error::RateLimited` - Server returned 429 after all retries
    /// - `Error::NotFound` - Server returned 404
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get_with_retry(url, None, 0).await?;
        Ok(response.text().await?)
    }

    /// Fetch the body of a URL as text, sending a Referer header
    ///
    /// Some embed hosts only answer requests that arrive "from" the
    /// page embedding them.
    pub async fn get_text_with_referer(&self, url: &str, referer: &str) -> Result<String> {
        let response = self.get_with_retry(url, Some(referer), 0).await?;
        Ok(response.text().await?)
    }

    /// Fetch a URL and deserialize the JSON response body
    ///
    /// # Errors
    /// In addition to the transport errors of [`get_text`](Self::get_text),
    /// returns `Error::Parse` when the body is not valid JSON for `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get_with_retry(url, None, 0).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Parse(format!("JSON: {e}")))
    }

    /// Fetch a URL with a Referer header and deserialize the JSON body
    pub async fn get_json_with_referer<T: DeserializeOwned>(
        &self,
        url: &str,
        referer: &str,
    ) -> Result<T> {
        let response = self.get_with_retry(url, Some(referer), 0).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Parse(format!("JSON: {e}")))
    }

    /// Internal method to fetch with retry logic
    fn get_with_retry<'a>(
        &'a self,
        url: &'a str,
        referer: Option<&'a str>,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<reqwest::Response>> + Send + 'a>>
    {
        Box::pin(async move {
            // Wait for rate limiter before making request
            self.rate_limiter.acquire().await;

            let mut request = self.client.get(url);
            if let Some(referer) = referer {
                request = request.header(reqwest::header::REFERER, referer);
            }

            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            // Handle 404 - Not Found (no retry)
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(Error::NotFound(url.to_string()));
            }

            // Handle 429 - Rate Limited
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_RETRIES {
                    let delay = self.backoff_delay(attempt);
                    sleep(delay).await;
                    return self.get_with_retry(url, referer, attempt + 1).await;
                }
                return Err(Error::RateLimited);
            }

            // Handle 5xx - Server errors
            if status.is_server_error() && attempt < MAX_RETRIES {
                let delay = self.backoff_delay(attempt);
                sleep(delay).await;
                return self.get_with_retry(url, referer, attempt + 1).await;
            }

            // Other errors - convert to Http
            Err(Error::Http(response.error_for_status().unwrap_err()))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: 1s, 2s, 4s, ...
        let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }
}
