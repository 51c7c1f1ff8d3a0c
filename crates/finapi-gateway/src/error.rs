//! Gateway error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Secrets error: {0}")]
    Secrets(#[from] finapi_secrets::SecretsError),

    #[error("Feed error: {0}")]
    Feed(#[from] finapi_feed::FeedError),

    #[error("Quotes error: {0}")]
    Quotes(#[from] finapi_quotes::QuotesError),

    #[error("Store error: {0}")]
    Store(#[from] finapi_store::StoreError),

    #[error("Transcript error: {0}")]
    Transcript(#[from] finapi_transcripts::TranscriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
