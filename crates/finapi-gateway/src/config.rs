//! Gateway configuration.

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL recorded in access-log entries.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_port() -> u16 {
    8080
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Remote logging relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Base URL of the logging service.
    #[serde(default = "default_relay_base_url")]
    pub base_url: String,
    /// Destination log table.
    #[serde(default = "default_relay_table")]
    pub table: String,
}

fn default_relay_base_url() -> String {
    "http://localhost:9000/logging".to_string()
}

fn default_relay_table() -> String {
    "finance_logs".to_string()
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            base_url: default_relay_base_url(),
            table: default_relay_table(),
        }
    }
}

/// Streaming feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    /// WebSocket endpoint URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Instruments to subscribe to.
    #[serde(default = "default_products")]
    pub products: Vec<String>,
    /// Collection window length (ms).
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

fn default_ws_url() -> String {
    "wss://advanced-trade-ws.coinbase.com".to_string()
}

fn default_products() -> Vec<String> {
    ["BTC-USD", "ETH-USD", "BTC-PERP", "ETH-PERP"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_window_ms() -> u64 {
    3000
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            products: default_products(),
            window_ms: default_window_ms(),
        }
    }
}

/// Quote source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Market-data API base URL.
    #[serde(default = "default_market_data_url")]
    pub market_data_url: String,
    /// Scraped equity site base URL.
    #[serde(default = "default_scrape_url")]
    pub scrape_url: String,
}

fn default_market_data_url() -> String {
    "https://www.alphavantage.co".to_string()
}

fn default_scrape_url() -> String {
    "https://www.gurufocus.com".to_string()
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            market_data_url: default_market_data_url(),
            scrape_url: default_scrape_url(),
        }
    }
}

/// Transcript API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Transcript API base URL.
    #[serde(default = "default_transcript_api_url")]
    pub api_url: String,
}

fn default_transcript_api_url() -> String {
    "https://api.api-ninjas.com".to_string()
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            api_url: default_transcript_api_url(),
        }
    }
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Secrets store URL.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Relational store URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub relay: RelaySettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub quotes: QuoteSettings,
    #[serde(default)]
    pub transcripts: TranscriptSettings,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_database_url() -> String {
    "postgresql://localhost/finance".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            redis_url: default_redis_url(),
            database_url: default_database_url(),
            relay: RelaySettings::default(),
            feed: FeedSettings::default(),
            quotes: QuoteSettings::default(),
            transcripts: TranscriptSettings::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the default location.
    pub fn load() -> GatewayResult<Self> {
        let config_path =
            std::env::var("FINAPI_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> GatewayResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {e}")))
    }
}
