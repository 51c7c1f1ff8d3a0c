//! Remote logging relay client.
//!
//! Forwards structured log lines and resource-access records to the external
//! logging service. Every call is best-effort: a failed or slow relay must
//! never take a request handler down with it, so errors are reported through
//! local tracing only.

use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Default timeout for relay requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Severity levels understood by the logging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Debug,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the logging service.
    pub base_url: String,
    /// Destination log table.
    pub table: String,
}

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    table: &'a str,
    category: &'a str,
    level: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct ResourceAccessRequest<'a> {
    resource: &'a str,
    ip_address: &'a str,
}

/// Client for the remote logging service.
#[derive(Clone)]
pub struct LogRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl LogRelay {
    /// Create a relay client.
    ///
    /// Falls back to a default reqwest client if the builder fails, so
    /// construction itself cannot abort gateway startup.
    pub fn new(config: RelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Append a log line to the remote service.
    pub async fn append_to_log(&self, token: &str, level: Severity, message: &str) {
        let body = AppendRequest {
            table: &self.config.table,
            category: "FINANCE",
            level: level.as_str(),
            message,
        };

        let url = format!("{}/append-to-log", self.config.base_url);
        let result = self
            .client
            .post(&url)
            .header("token", token)
            .json(&body)
            .send()
            .await;

        if let Err(e) = result {
            warn!(error = %e, "Log relay append failed");
        }
    }

    /// Record an access to a gateway resource.
    pub async fn log_resource_access(&self, token: &str, resource: &str, ip_address: &str) {
        let body = ResourceAccessRequest {
            resource,
            ip_address,
        };

        let url = format!("{}/log-resource-access", self.config.base_url);
        let result = self
            .client
            .post(&url)
            .header("token", token)
            .json(&body)
            .send()
            .await;

        if let Err(e) = result {
            warn!(error = %e, "Resource access relay failed");
        }
    }
}
