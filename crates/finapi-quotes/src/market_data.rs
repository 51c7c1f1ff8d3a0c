//! Market-data API client.
//!
//! Covers the three query functions the gateway uses: realtime FX
//! conversion, 1-minute intraday series, and company overview (for market
//! capitalization). The API returns numeric values as strings throughout.

use crate::error::{QuotesError, QuotesResult};
use crate::format::format_market_cap;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the quote/market-data API.
pub struct MarketDataClient {
    client: Client,
    base_url: String,
}

impl MarketDataClient {
    /// Create a new client against the API base URL
    /// (e.g., "https://www.alphavantage.co").
    pub fn new(base_url: impl Into<String>) -> QuotesResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| QuotesError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn query(&self, params: &[(&str, &str)]) -> QuotesResult<serde_json::Value> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| QuotesError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuotesError::HttpClient(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| QuotesError::HttpClient(format!("Failed to parse response: {e}")))
    }

    /// Fetch the USD -> `currency` conversion rate, rounded to 2 decimals.
    pub async fn fx_rate(&self, api_key: &str, currency: &str) -> QuotesResult<String> {
        debug!(currency = %currency, "Fetching FX conversion rate");

        let body = self
            .query(&[
                ("function", "CURRENCY_EXCHANGE_RATE"),
                ("from_currency", "USD"),
                ("to_currency", currency),
                ("apikey", api_key),
            ])
            .await?;

        let rate = parse_fx_rate(&body)?;
        info!(currency = %currency, rate = %rate, "Fetched FX conversion rate");
        Ok(rate)
    }

    /// Fetch the latest 1-minute close price, rounded to 2 decimals.
    pub async fn intraday_price(&self, api_key: &str, ticker: &str) -> QuotesResult<String> {
        debug!(ticker = %ticker, "Fetching intraday price");

        let body = self
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("interval", "1min"),
                ("symbol", ticker),
                ("apikey", api_key),
            ])
            .await?;

        let price = parse_latest_close(&body)?;
        info!(ticker = %ticker, price = %price, "Fetched intraday price");
        Ok(price)
    }

    /// Fetch the company market capitalization, formatted with a magnitude
    /// suffix.
    ///
    /// Returns `Ok(None)` for ".HK" tickers: the API has no overview data
    /// for Hong Kong listings, so the lookup is skipped entirely.
    pub async fn company_market_cap(
        &self,
        api_key: &str,
        ticker: &str,
    ) -> QuotesResult<Option<String>> {
        if ticker.contains(".HK") {
            debug!(ticker = %ticker, "Skipping market cap lookup for .HK ticker");
            return Ok(None);
        }

        let body = self
            .query(&[
                ("function", "OVERVIEW"),
                ("symbol", ticker),
                ("apikey", api_key),
            ])
            .await?;

        let raw = body
            .get("MarketCapitalization")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                QuotesError::ResponseShape("overview missing MarketCapitalization".to_string())
            })?;

        let value: f64 = raw
            .parse()
            .map_err(|_| QuotesError::ResponseShape(format!("bad market cap value: {raw}")))?;

        Ok(Some(format_market_cap(value)))
    }
}

fn parse_fx_rate(body: &serde_json::Value) -> QuotesResult<String> {
    let raw = body
        .get("Realtime Currency Exchange Rate")
        .and_then(|v| v.get("5. Exchange Rate"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| QuotesError::ResponseShape("missing exchange rate field".to_string()))?;

    let rate = Decimal::from_str(raw)
        .map_err(|_| QuotesError::ResponseShape(format!("bad exchange rate: {raw}")))?;

    Ok(rate.round_dp(2).normalize().to_string())
}

fn parse_latest_close(body: &serde_json::Value) -> QuotesResult<String> {
    let series = body
        .get("Time Series (1min)")
        .and_then(|v| v.as_object())
        .ok_or_else(|| QuotesError::ResponseShape("missing intraday series".to_string()))?;

    // Keys are "YYYY-MM-DD HH:MM:SS" timestamps; the lexicographic max is
    // the most recent bar.
    let latest = series
        .keys()
        .max()
        .ok_or_else(|| QuotesError::ResponseShape("empty intraday series".to_string()))?;

    let raw = series
        .get(latest)
        .and_then(|bar| bar.get("4. close"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| QuotesError::ResponseShape("bar missing close price".to_string()))?;

    let close = Decimal::from_str(raw)
        .map_err(|_| QuotesError::ResponseShape(format!("bad close price: {raw}")))?;

    Ok(close.round_dp(2).normalize().to_string())
}
