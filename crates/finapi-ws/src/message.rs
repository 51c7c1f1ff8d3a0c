//! Outbound feed protocol messages.

use serde::Serialize;

/// Subscribe/unsubscribe request for the feed's ticker channel.
#[derive(Debug, Clone, Serialize)]
pub struct FeedRequest {
    /// "subscribe" or "unsubscribe".
    #[serde(rename = "type")]
    pub request_type: String,
    /// Instrument identifiers (e.g., "BTC-USD").
    pub product_ids: Vec<String>,
    /// Channel name, "ticker" for quote updates.
    pub channel: String,
    /// API key name. Omitted when the feed is consumed anonymously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl FeedRequest {
    /// Build a subscribe request.
    pub fn subscribe(
        product_ids: Vec<String>,
        channel: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            request_type: "subscribe".to_string(),
            product_ids,
            channel: channel.into(),
            api_key,
        }
    }

    /// Build an unsubscribe request for the same channel.
    pub fn unsubscribe(product_ids: Vec<String>, channel: impl Into<String>) -> Self {
        Self {
            request_type: "unsubscribe".to_string(),
            product_ids,
            channel: channel.into(),
            api_key: None,
        }
    }
}
