//! Quote fetcher error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuotesError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type QuotesResult<T> = Result<T, QuotesError>;
