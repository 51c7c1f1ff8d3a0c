//! Timer-bounded collection window.
//!
//! The window is an explicit timer, not a sleep on the read path: a
//! cancellation token is tripped by a spawned timer task at expiry, and the
//! read loop selects over the token and the socket. Cancellation therefore
//! interrupts a pending read immediately, after which the session
//! unsubscribes and closes. Ticks can only be recorded while the loop runs,
//! so nothing arriving after close is counted.

use crate::aggregator::{ProductMap, WindowAccumulator};
use crate::error::FeedResult;
use crate::parser::parse_ticker;
use finapi_core::{Coin, CoinSpread};
use finapi_ws::FeedClient;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Open a feed session, accumulate ticks for `window`, then unsubscribe,
/// close, and return the per-coin mean spreads.
pub async fn collect_spreads(
    client: &FeedClient,
    products: ProductMap,
    window: Duration,
) -> FeedResult<Vec<(Coin, CoinSpread)>> {
    let mut session = client.connect().await?;
    session.subscribe().await?;

    let cancel = CancellationToken::new();
    let timer = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(window).await;
        timer.cancel();
    });

    let mut accumulator = WindowAccumulator::new(products);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(samples = accumulator.sample_count(), "Collection window expired");
                break;
            }
            frame = session.next_text() => {
                match frame? {
                    Some(text) => {
                        if let Some(tick) = parse_ticker(&text) {
                            accumulator.record(&tick);
                        }
                    }
                    None => {
                        warn!("Feed ended before window expiry");
                        break;
                    }
                }
            }
        }
    }

    session.unsubscribe().await?;
    session.close().await?;

    let spreads = accumulator.finalize();
    info!(coins = spreads.len(), "Aggregation window complete");
    Ok(spreads)
}
