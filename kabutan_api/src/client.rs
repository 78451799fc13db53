//! HTTP client for kabutan.jp stock pages.

use std::time::Duration;

use crate::errors::FetchError;

/// Request timeout for page fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base unit of the retry schedule; the n-th retry waits n of these.
const RETRY_DELAY: Duration = Duration::from_secs(10);

/// One initial request plus five retries on server errors.
const MAX_ATTEMPTS: u32 = 6;

const USER_AGENT: &str = concat!("kabutan-scraper/", env!("CARGO_PKG_VERSION"));

/// HTTP client for kabutan.jp stock pages.
///
/// Server errors are retried on an escalating schedule before the page is
/// declared unavailable; client errors are not retried at all. Cheap to
/// clone, so every concurrent scrape task can carry its own handle.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    retry_delay: Duration,
}

impl Client {
    /// Creates a client pointing at the production site.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url("https://kabutan.jp")
    }

    /// Creates a client with a custom base URL. Used for testing with
    /// wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            retry_delay: RETRY_DELAY,
        })
    }

    /// Replaces the base unit of the retry schedule. Tests shorten it so
    /// exhausting every attempt stays fast.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Fetches the top page of a securities code, where the identity
    /// (code, name, market) is shown.
    pub async fn stock_page(&self, code: &str) -> Result<Option<String>, FetchError> {
        let url = format!("{}/stock/?code={}", self.base_url, code);
        self.fetch_html(&url).await
    }

    /// Fetches the financial-results page of a securities code.
    pub async fn finance_page(&self, code: &str) -> Result<Option<String>, FetchError> {
        let url = format!("{}/stock/finance?code={}", self.base_url, code);
        self.fetch_html(&url).await
    }

    /// One page fetch under the retry schedule.
    ///
    /// `Ok(Some(html))` on success. `Ok(None)` when the page is
    /// unavailable: a client-error status, or a server error that
    /// persisted through every attempt. `Err` only for transport
    /// failures, which abort the whole run.
    async fn fetch_html(&self, url: &str) -> Result<Option<String>, FetchError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let response = self.http.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(Some(response.text().await?));
            }
            if !status.is_server_error() {
                tracing::warn!("Page unavailable ({}): {}", status, url);
                return Ok(None);
            }
            if attempt == MAX_ATTEMPTS {
                break;
            }

            let wait = self.retry_wait(attempt);
            tracing::debug!(
                "Attempt {} of {} got {}, retrying {} in {:?}",
                attempt,
                MAX_ATTEMPTS,
                status,
                url,
                wait
            );
            tokio::time::sleep(wait).await;
        }

        tracing::warn!(
            "Server error persisted through {} attempts: {}",
            MAX_ATTEMPTS,
            url
        );
        Ok(None)
    }

    /// Wait before the next attempt, after `attempt` failures: the
    /// schedule escalates linearly and carries no jitter.
    fn retry_wait(&self, attempt: u32) -> Duration {
        self.retry_delay * attempt
    }
}
