//! Typed secrets bundle and the Redis store that serves it.

use crate::error::{SecretsError, SecretsResult};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Entry holding a single API token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub api_token: String,
}

/// Entry holding a single API key.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyEntry {
    pub api_key: String,
}

/// Credentials for the streaming market-data feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCredentials {
    /// Key name/identifier.
    pub name: String,
    /// Private key material.
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

/// Inner secrets tree as stored in Redis.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsTree {
    /// Bearer token expected on authenticated gateway endpoints.
    pub finance_tools: TokenEntry,
    /// Token presented to the remote logging relay.
    pub logging_microservice: TokenEntry,
    /// Per-service API keys (e.g. "alpha_vantage").
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Transcript API key.
    #[serde(rename = "api-ninjas")]
    pub api_ninjas: ApiKeyEntry,
    /// Streaming feed credentials.
    pub coinbase_api_key: FeedCredentials,
}

/// Top-level secrets document.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsBundle {
    pub secrets: SecretsTree,
}

impl SecretsBundle {
    /// Token expected in the `token` header of authenticated endpoints.
    pub fn finance_token(&self) -> &str {
        &self.secrets.finance_tools.api_token
    }

    /// Token for the remote logging relay.
    pub fn logging_token(&self) -> &str {
        &self.secrets.logging_microservice.api_token
    }

    /// API key for a named quote service.
    pub fn api_key(&self, service: &str) -> SecretsResult<&str> {
        self.secrets
            .api_keys
            .get(service)
            .map(String::as_str)
            .ok_or_else(|| SecretsError::NotFound(format!("api_keys.{service}")))
    }

    /// Transcript API key.
    pub fn transcript_api_key(&self) -> &str {
        &self.secrets.api_ninjas.api_key
    }

    /// Streaming feed credentials.
    pub fn feed_credentials(&self) -> &FeedCredentials {
        &self.secrets.coinbase_api_key
    }
}

/// Secrets store client.
///
/// Holds only a `redis::Client`; connections are established per fetch.
#[derive(Clone)]
pub struct SecretsStore {
    client: redis::Client,
}

impl SecretsStore {
    /// Create a store against the given Redis URL.
    pub fn new(redis_url: &str) -> SecretsResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Fetch the full secrets bundle.
    ///
    /// The document is stored via RedisJSON; `JSON.GET <key> $` returns a
    /// one-element JSON array wrapping the document.
    pub async fn fetch(&self) -> SecretsResult<SecretsBundle> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let raw: String = redis::cmd("JSON.GET")
            .arg("secrets")
            .arg("$")
            .query_async(&mut conn)
            .await?;

        debug!(bytes = raw.len(), "Fetched secrets document");

        let mut documents: Vec<SecretsBundle> = serde_json::from_str(&raw)?;
        if documents.is_empty() {
            return Err(SecretsError::Malformed(
                "JSON.GET returned an empty result set".to_string(),
            ));
        }
        Ok(documents.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[{
        "secrets": {
            "finance_tools": {"api_token": "fin-token"},
            "logging_microservice": {"api_token": "log-token"},
            "api_keys": {"alpha_vantage": "av-key"},
            "api-ninjas": {"api_key": "ninja-key"},
            "coinbase_api_key": {"name": "key-name", "privateKey": "key-material"}
        }
    }]"#;

    #[test]
    fn test_bundle_parses_store_document() {
        let docs: Vec<SecretsBundle> = serde_json::from_str(FIXTURE).unwrap();
        let bundle = &docs[0];
        assert_eq!(bundle.finance_token(), "fin-token");
        assert_eq!(bundle.logging_token(), "log-token");
        assert_eq!(bundle.api_key("alpha_vantage").unwrap(), "av-key");
        assert_eq!(bundle.transcript_api_key(), "ninja-key");
        assert_eq!(bundle.feed_credentials().name, "key-name");
    }

    #[test]
    fn test_missing_api_key_is_not_found() {
        let docs: Vec<SecretsBundle> = serde_json::from_str(FIXTURE).unwrap();
        let err = docs[0].api_key("unknown_service").unwrap_err();
        assert!(matches!(err, SecretsError::NotFound(_)));
    }
}
