//! Ticker frame parsing.
//!
//! The feed interleaves quote updates with subscription acks and heartbeat
//! frames on the same connection. Parsing is tolerant: anything that is not
//! a quote update with both sides present is skipped, not an error.

use finapi_core::QuoteTick;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw ticker frame. The feed sends numeric fields as strings.
#[derive(Debug, Deserialize)]
struct RawTicker {
    product_id: String,
    best_bid: String,
    best_ask: String,
}

/// Parse a text frame into a quote tick.
///
/// Returns `None` for frames without a `product_id`/bid/ask triple and for
/// unparseable prices.
pub fn parse_ticker(text: &str) -> Option<QuoteTick> {
    let raw: RawTicker = serde_json::from_str(text).ok()?;
    let best_bid = Decimal::from_str(&raw.best_bid).ok()?;
    let best_ask = Decimal::from_str(&raw.best_ask).ok()?;

    Some(QuoteTick {
        product_id: raw.product_id,
        best_bid,
        best_ask,
    })
}
