//! Secrets error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Secrets document malformed: {0}")]
    Malformed(String),

    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SecretsResult<T> = Result<T, SecretsError>;
