//! Telemetry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Logging init error: {0}")]
    Init(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
