//! Shared market data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coins tracked by the futures spread aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Btc,
    Eth,
}

impl Coin {
    /// Lowercase ticker used in table names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Eth => "eth",
        }
    }

    /// Destination table for this coin's spread rows.
    ///
    /// The name is derived from the enum, never from user input.
    pub fn table_name(&self) -> String {
        format!("{}_perp_futures", self.as_str())
    }

    /// All tracked coins.
    pub fn all() -> [Coin; 2] {
        [Self::Btc, Self::Eth]
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market segment of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Immediate-delivery market.
    Spot,
    /// Perpetual futures contract.
    Perp,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spot => f.write_str("spot"),
            Self::Perp => f.write_str("perp"),
        }
    }
}

/// A single best bid/ask observation from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTick {
    /// Instrument identifier as sent by the feed (e.g., "BTC-USD").
    pub product_id: String,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
}

/// Mean bid/ask per segment for one coin over an aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoinSpread {
    pub spot_bid: Decimal,
    pub spot_ask: Decimal,
    pub perp_bid: Decimal,
    pub perp_ask: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_table_names() {
        assert_eq!(Coin::Btc.table_name(), "btc_perp_futures");
        assert_eq!(Coin::Eth.table_name(), "eth_perp_futures");
    }

    #[test]
    fn test_coin_display() {
        assert_eq!(Coin::Btc.to_string(), "btc");
        assert_eq!(Segment::Perp.to_string(), "perp");
    }
}
