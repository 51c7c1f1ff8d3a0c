//! Shared application state for axum handlers.

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use finapi_quotes::{MarketDataClient, PageClient};
use finapi_secrets::SecretsStore;
use finapi_store::{connect_pool, FuturesWriter, TranscriptStore};
use finapi_telemetry::{LogRelay, RelayConfig, Severity};
use finapi_transcripts::{TranscriptApiClient, TranscriptService};
use std::sync::Arc;
use tracing::warn;

struct Inner {
    config: GatewayConfig,
    secrets: SecretsStore,
    relay: LogRelay,
    market_data: MarketDataClient,
    pages: PageClient,
    futures_writer: FuturesWriter,
    transcripts: TranscriptService<TranscriptStore, TranscriptApiClient>,
}

/// Cheaply cloneable handle shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Wire up all collaborators from the configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let secrets = SecretsStore::new(&config.redis_url)?;
        let relay = LogRelay::new(RelayConfig {
            base_url: config.relay.base_url.clone(),
            table: config.relay.table.clone(),
        });
        let market_data = MarketDataClient::new(config.quotes.market_data_url.clone())?;
        let pages = PageClient::new(config.quotes.scrape_url.clone())?;

        let pool = connect_pool(&config.database_url)?;
        let futures_writer = FuturesWriter::new(pool.clone());
        let transcripts = TranscriptService::new(
            TranscriptStore::new(pool),
            TranscriptApiClient::new(config.transcripts.api_url.clone())?,
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                secrets,
                relay,
                market_data,
                pages,
                futures_writer,
                transcripts,
            }),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn secrets(&self) -> &SecretsStore {
        &self.inner.secrets
    }

    pub fn market_data(&self) -> &MarketDataClient {
        &self.inner.market_data
    }

    pub fn pages(&self) -> &PageClient {
        &self.inner.pages
    }

    pub fn futures_writer(&self) -> &FuturesWriter {
        &self.inner.futures_writer
    }

    pub fn transcripts(&self) -> &TranscriptService<TranscriptStore, TranscriptApiClient> {
        &self.inner.transcripts
    }

    /// Append a line to the remote log, best-effort.
    ///
    /// The relay token comes from the secrets store; if that fetch fails the
    /// line is only logged locally. Handlers never fail because of this.
    pub async fn relay_log(&self, level: Severity, message: &str) {
        match self.inner.secrets.fetch().await {
            Ok(bundle) => {
                self.inner
                    .relay
                    .append_to_log(bundle.logging_token(), level, message)
                    .await;
            }
            Err(e) => {
                warn!(error = %e, dropped = message, "No relay token, log line not forwarded");
            }
        }
    }

    /// Record a resource access in the remote log, best-effort.
    pub async fn relay_access(&self, resource: &str, ip_address: &str) {
        match self.inner.secrets.fetch().await {
            Ok(bundle) => {
                self.inner
                    .relay
                    .log_resource_access(bundle.logging_token(), resource, ip_address)
                    .await;
            }
            Err(e) => {
                warn!(error = %e, "No relay token, access record not forwarded");
            }
        }
    }
}
