//! External transcript API client.

use crate::error::{TranscriptError, TranscriptResult};
use crate::service::TranscriptSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    transcript: Option<String>,
}

/// Client for the earnings-transcript API.
pub struct TranscriptApiClient {
    client: Client,
    base_url: String,
}

impl TranscriptApiClient {
    /// Create a new client against the API base URL
    /// (e.g., "https://api.api-ninjas.com").
    pub fn new(base_url: impl Into<String>) -> TranscriptResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| {
                TranscriptError::HttpClient(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl TranscriptSource for TranscriptApiClient {
    async fn fetch(
        &self,
        api_key: &str,
        ticker: &str,
        year: i32,
        quarter: i32,
    ) -> TranscriptResult<String> {
        let url = format!("{}/v1/earningstranscript", self.base_url);
        debug!(ticker = %ticker, year, quarter, "Fetching transcript from API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ticker", ticker),
                ("year", &year.to_string()),
                ("quarter", &quarter.to_string()),
            ])
            .header("X-Api-Key", api_key)
            .send()
            .await
            .map_err(|e| TranscriptError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptError::Upstream(format!("HTTP {status}: {body}")));
        }

        let body: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptError::Upstream(format!("Failed to parse response: {e}")))?;

        // A well-formed response with no transcript field means the upstream
        // genuinely has nothing for this key.
        Ok(body.transcript.unwrap_or_default())
    }
}
