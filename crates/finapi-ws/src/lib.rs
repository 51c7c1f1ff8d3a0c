//! WebSocket client for the streaming market-data feed.
//!
//! Provides a single-shot feed session: connect, subscribe to a set of
//! product channels, read frames until the caller stops, unsubscribe, close.
//! There is no reconnection or persistent-session machinery; the aggregation
//! window that consumes this client lives for a few seconds per request.

pub mod connection;
pub mod error;
pub mod message;

pub use connection::{FeedClient, FeedConfig, FeedSession};
pub use error::{WsError, WsResult};
pub use message::FeedRequest;

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
