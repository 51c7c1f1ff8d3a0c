//! Collection window integration tests against a mock feed.

mod common;
use common::mock_feed::MockFeedServer;

use finapi_feed::{collect_spreads, ProductMap};
use finapi_ws::{FeedClient, FeedConfig};
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio::time::timeout;

fn ticker_frame(product: &str, bid: &str, ask: &str) -> String {
    format!(r#"{{"product_id":"{product}","best_bid":"{bid}","best_ask":"{ask}"}}"#)
}

fn standard_products() -> Vec<String> {
    ["BTC-USD", "ETH-USD", "BTC-PERP", "ETH-PERP"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The aggregator subscribes, collects for the window, then unsubscribes and
/// computes per-coin means even while the server keeps streaming.
#[tokio::test]
async fn test_window_collects_and_unsubscribes() {
    let frames = vec![
        ticker_frame("BTC-USD", "100", "101"),
        ticker_frame("BTC-PERP", "99", "100"),
        ticker_frame("ETH-USD", "10", "12"),
        ticker_frame("ETH-PERP", "9", "11"),
        // Interleaved noise frames must be skipped, not counted.
        r#"{"type":"heartbeat"}"#.to_string(),
    ];
    let server = MockFeedServer::start(frames).await;

    let products = standard_products();
    let client = FeedClient::new(FeedConfig {
        url: server.url(),
        products: products.clone(),
        ..Default::default()
    });

    let result = timeout(
        Duration::from_secs(5),
        collect_spreads(&client, ProductMap::infer(&products), Duration::from_millis(400)),
    )
    .await
    .expect("window must end at the timer, not hang");

    let spreads = result.expect("collection should succeed");
    assert_eq!(spreads.len(), 2, "both coins should produce a row");

    for (_, spread) in &spreads {
        // Every sample per bucket is identical, so the mean equals it.
        assert!(spread.spot_bid == dec!(100) || spread.spot_bid == dec!(10));
        assert!(spread.perp_ask == dec!(100) || spread.perp_ask == dec!(11));
    }

    // The session must have sent subscribe then unsubscribe. The unsubscribe
    // frame is written just before the session future resolves, so the mock
    // server's reader task may not have recorded it yet when we look; poll
    // the received buffer until it appears (or a deadline passes).
    let mut messages = server.received_messages().await;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !messages.iter().any(|m| m.contains(r#""type":"unsubscribe""#))
        && tokio::time::Instant::now() < deadline
    {
        tokio::time::sleep(Duration::from_millis(20)).await;
        messages = server.received_messages().await;
    }
    assert!(messages.iter().any(|m| m.contains(r#""type":"subscribe""#)));
    assert!(messages.iter().any(|m| m.contains(r#""type":"unsubscribe""#)));

    server.shutdown().await;
}

/// A silent feed yields no rows but still terminates at the window boundary.
#[tokio::test]
async fn test_window_with_no_ticks_yields_no_rows() {
    let server = MockFeedServer::start(Vec::new()).await;

    let products = standard_products();
    let client = FeedClient::new(FeedConfig {
        url: server.url(),
        products: products.clone(),
        ..Default::default()
    });

    let result = timeout(
        Duration::from_secs(5),
        collect_spreads(&client, ProductMap::infer(&products), Duration::from_millis(200)),
    )
    .await
    .expect("window must end at the timer");

    let spreads = result.expect("an empty window is not an error");
    assert!(spreads.is_empty());

    server.shutdown().await;
}
