//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] finapi_ws::WsError),
}

pub type FeedResult<T> = Result<T, FeedError>;
