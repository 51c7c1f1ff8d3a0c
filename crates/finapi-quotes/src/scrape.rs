//! Scraped equity page fetcher.

use crate::error::{QuotesError, QuotesResult};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default timeout for page fetches.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The site serves full pages to anything that looks like a desktop
/// browser; a plain library user agent gets an interstitial instead.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";

/// Client for the scraped equity site.
pub struct PageClient {
    client: Client,
    base_url: String,
}

impl PageClient {
    /// Create a new client against the site base URL
    /// (e.g., "https://www.gurufocus.com").
    pub fn new(base_url: impl Into<String>) -> QuotesResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| QuotesError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the raw summary page body for a ticker.
    pub async fn page_source(&self, ticker: &str) -> QuotesResult<String> {
        let url = format!("{}/stock/{}/summary", self.base_url, ticker);
        debug!(url = %url, "Fetching equity page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuotesError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuotesError::HttpClient(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| QuotesError::HttpClient(format!("Failed to read page body: {e}")))
    }
}
