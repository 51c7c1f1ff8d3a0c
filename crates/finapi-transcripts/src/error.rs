//! Transcript error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Store error: {0}")]
    Store(#[from] finapi_store::StoreError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type TranscriptResult<T> = Result<T, TranscriptError>;
