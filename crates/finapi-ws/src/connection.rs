//! Feed connection lifecycle.
//!
//! A `FeedClient` opens one `FeedSession` per aggregation request. The
//! session owns the socket; the caller drives it with `subscribe`,
//! `next_text`, `unsubscribe` and `close`.

use crate::error::WsResult;
use crate::message::FeedRequest;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async_tls_with_config, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Feed connection configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket URL.
    pub url: String,
    /// Instrument identifiers to subscribe to.
    pub products: Vec<String>,
    /// Channel carrying quote updates.
    pub channel: String,
    /// API key name attached to the subscribe request, if any.
    pub api_key: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            products: Vec::new(),
            channel: "ticker".to_string(),
            api_key: None,
        }
    }
}

/// Factory for feed sessions.
pub struct FeedClient {
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Open a connection and return the live session.
    pub async fn connect(&self) -> WsResult<FeedSession> {
        info!(url = %self.config.url, "Connecting to market data feed");

        let (ws_stream, _response) =
            connect_async_tls_with_config(&self.config.url, None, true, None).await?;
        let (write, read) = ws_stream.split();

        info!("Feed connected");

        Ok(FeedSession {
            config: self.config.clone(),
            write,
            read,
        })
    }
}

/// A live, single-shot feed session.
pub struct FeedSession {
    config: FeedConfig,
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
}

impl FeedSession {
    /// Subscribe to the configured products on the quote channel.
    pub async fn subscribe(&mut self) -> WsResult<()> {
        let request = FeedRequest::subscribe(
            self.config.products.clone(),
            self.config.channel.clone(),
            self.config.api_key.clone(),
        );
        let payload = serde_json::to_string(&request)?;
        self.write.send(Message::Text(payload)).await?;

        debug!(
            products = ?self.config.products,
            channel = %self.config.channel,
            "Subscription sent"
        );
        Ok(())
    }

    /// Unsubscribe from the configured products.
    pub async fn unsubscribe(&mut self) -> WsResult<()> {
        let request =
            FeedRequest::unsubscribe(self.config.products.clone(), self.config.channel.clone());
        let payload = serde_json::to_string(&request)?;
        self.write.send(Message::Text(payload)).await?;

        debug!(products = ?self.config.products, "Unsubscribe sent");
        Ok(())
    }

    /// Read the next text frame, answering transport pings along the way.
    ///
    /// Returns `Ok(None)` once the server closes the connection or the
    /// stream ends.
    pub async fn next_text(&mut self) -> WsResult<Option<String>> {
        loop {
            match self.read.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Ping(data))) => {
                    debug!("Received ping, sending pong");
                    self.write.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (u16::from(f.code), f.reason.to_string()))
                        .unwrap_or((1000, "Normal close".to_string()));
                    warn!(code, %reason, "Feed closed by server");
                    return Ok(None);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    warn!("Feed stream ended");
                    return Ok(None);
                }
            }
        }
    }

    /// Send a Close frame and drop the connection.
    pub async fn close(mut self) -> WsResult<()> {
        if let Err(e) = self.write.send(Message::Close(None)).await {
            warn!(?e, "Failed to send Close frame");
        }
        info!("Feed connection closed");
        Ok(())
    }
}
