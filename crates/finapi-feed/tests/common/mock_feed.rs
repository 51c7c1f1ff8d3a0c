//! Mock market-data feed for integration tests.
//!
//! Accepts a WebSocket connection, and once a subscribe request arrives,
//! streams a fixed rotation of ticker frames until the client unsubscribes
//! or disconnects. Received control messages are recorded for assertions.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// A mock feed server on an ephemeral port.
pub struct MockFeedServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockFeedServer {
    /// Start the server, streaming `frames` in rotation after subscription.
    pub async fn start(frames: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let messages_clone = messages.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        let messages = messages_clone.clone();
                        let frames = frames.clone();
                        tokio::spawn(handle_connection(stream, messages, frames));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            messages,
        }
    }

    /// The server's WebSocket URL.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// All control messages received from the client.
    pub async fn received_messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }

    /// Shut the server down.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    messages: Arc<Mutex<Vec<String>>>,
    frames: Vec<String>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {e}");
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();
    let mut streaming = false;
    let mut frame_idx = 0usize;
    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(10));

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        {
                            let mut msgs = messages.lock().await;
                            msgs.push(text.clone());
                        }
                        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&text) {
                            match parsed.get("type").and_then(|t| t.as_str()) {
                                Some("subscribe") => streaming = true,
                                Some("unsubscribe") => streaming = false,
                                _ => {}
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            _ = ticker.tick() => {
                if streaming && !frames.is_empty() {
                    let frame = frames[frame_idx % frames.len()].clone();
                    frame_idx += 1;
                    if write.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}
