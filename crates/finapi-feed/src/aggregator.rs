//! Per-window spread accumulation.

use finapi_core::{Coin, CoinSpread, QuoteTick, Segment};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Maps feed product identifiers onto (coin, segment) buckets.
#[derive(Debug, Clone)]
pub struct ProductMap {
    map: HashMap<String, (Coin, Segment)>,
}

impl ProductMap {
    /// Infer the mapping from the configured product list.
    ///
    /// The coin comes from the identifier prefix, the segment from a "PERP"
    /// marker anywhere in the identifier, so both "BTC-PERP" and
    /// "BTC-PERP-INTX" land in the perpetual bucket. Unrecognized products
    /// are dropped with a warning.
    pub fn infer(products: &[String]) -> Self {
        let mut map = HashMap::new();
        for product in products {
            let upper = product.to_uppercase();
            let coin = if upper.starts_with("BTC") {
                Coin::Btc
            } else if upper.starts_with("ETH") {
                Coin::Eth
            } else {
                warn!(product = %product, "Unrecognized product, not tracked");
                continue;
            };
            let segment = if upper.contains("PERP") {
                Segment::Perp
            } else {
                Segment::Spot
            };
            map.insert(product.clone(), (coin, segment));
        }
        Self { map }
    }

    /// Resolve a feed product identifier to its bucket.
    pub fn resolve(&self, product_id: &str) -> Option<(Coin, Segment)> {
        self.map.get(product_id).copied()
    }
}

/// One accumulation bucket: running sums and a sample count.
#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    count: u64,
    bid_sum: Decimal,
    ask_sum: Decimal,
}

impl Bucket {
    fn record(&mut self, bid: Decimal, ask: Decimal) {
        self.count += 1;
        self.bid_sum += bid;
        self.ask_sum += ask;
    }

    /// Mean bid/ask. `None` when no samples were seen; the division is
    /// guarded here and nowhere else.
    fn mean(&self) -> Option<(Decimal, Decimal)> {
        if self.count == 0 {
            return None;
        }
        let n = Decimal::from(self.count);
        Some((self.bid_sum / n, self.ask_sum / n))
    }
}

/// Request-local accumulation state for one aggregation window.
///
/// Constructed at the start of each aggregation call and consumed by
/// [`WindowAccumulator::finalize`]; never shared between requests.
#[derive(Debug)]
pub struct WindowAccumulator {
    products: ProductMap,
    buckets: HashMap<(Coin, Segment), Bucket>,
}

impl WindowAccumulator {
    /// Create an empty accumulator over the given product mapping.
    pub fn new(products: ProductMap) -> Self {
        Self {
            products,
            buckets: HashMap::new(),
        }
    }

    /// Route a tick into its bucket. Returns false for unmapped products.
    pub fn record(&mut self, tick: &QuoteTick) -> bool {
        match self.products.resolve(&tick.product_id) {
            Some(key) => {
                self.buckets
                    .entry(key)
                    .or_default()
                    .record(tick.best_bid, tick.best_ask);
                true
            }
            None => {
                debug!(product = %tick.product_id, "Tick for untracked product ignored");
                false
            }
        }
    }

    /// Total samples recorded across all buckets.
    pub fn sample_count(&self) -> u64 {
        self.buckets.values().map(|b| b.count).sum()
    }

    /// Compute per-coin means.
    ///
    /// A coin with an empty spot or perp bucket produced no usable spread
    /// for this window; its row is skipped with a warning and the other
    /// coin is unaffected.
    pub fn finalize(self) -> Vec<(Coin, CoinSpread)> {
        let mut spreads = Vec::new();

        for coin in Coin::all() {
            let spot = self
                .buckets
                .get(&(coin, Segment::Spot))
                .and_then(Bucket::mean);
            let perp = self
                .buckets
                .get(&(coin, Segment::Perp))
                .and_then(Bucket::mean);

            match (spot, perp) {
                (Some((spot_bid, spot_ask)), Some((perp_bid, perp_ask))) => {
                    spreads.push((
                        coin,
                        CoinSpread {
                            spot_bid,
                            spot_ask,
                            perp_bid,
                            perp_ask,
                        },
                    ));
                }
                _ => {
                    warn!(
                        coin = %coin,
                        has_spot = spot.is_some(),
                        has_perp = perp.is_some(),
                        "Skipping coin with empty bucket in window"
                    );
                }
            }
        }

        spreads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_map() -> ProductMap {
        ProductMap::infer(&[
            "BTC-USD".to_string(),
            "ETH-USD".to_string(),
            "BTC-PERP".to_string(),
            "ETH-PERP".to_string(),
        ])
    }

    fn tick(product: &str, bid: Decimal, ask: Decimal) -> QuoteTick {
        QuoteTick {
            product_id: product.to_string(),
            best_bid: bid,
            best_ask: ask,
        }
    }

    #[test]
    fn test_means_per_bucket() {
        let mut acc = WindowAccumulator::new(standard_map());
        assert!(acc.record(&tick("BTC-USD", dec!(100), dec!(101))));
        assert!(acc.record(&tick("BTC-USD", dec!(100), dec!(101))));
        assert!(acc.record(&tick("BTC-PERP", dec!(99), dec!(100))));
        assert_eq!(acc.sample_count(), 3);

        let spreads = acc.finalize();
        assert_eq!(spreads.len(), 1);
        let (coin, spread) = &spreads[0];
        assert_eq!(*coin, Coin::Btc);
        assert_eq!(spread.spot_bid, dec!(100));
        assert_eq!(spread.spot_ask, dec!(101));
        assert_eq!(spread.perp_bid, dec!(99));
        assert_eq!(spread.perp_ask, dec!(100));
    }

    #[test]
    fn test_coin_with_empty_bucket_is_skipped() {
        let mut acc = WindowAccumulator::new(standard_map());
        acc.record(&tick("BTC-USD", dec!(100), dec!(101)));

        // No BTC-PERP samples: no usable spread for BTC, and none for ETH.
        let spreads = acc.finalize();
        assert!(spreads.is_empty());
    }

    #[test]
    fn test_unmapped_product_is_ignored() {
        let mut acc = WindowAccumulator::new(standard_map());
        assert!(!acc.record(&tick("SOL-USD", dec!(10), dec!(11))));
        assert_eq!(acc.sample_count(), 0);
    }

    #[test]
    fn test_product_map_handles_suffixed_perp_names() {
        let map = ProductMap::infer(&["BTC-PERP-INTX".to_string(), "ETH-USD".to_string()]);
        assert_eq!(map.resolve("BTC-PERP-INTX"), Some((Coin::Btc, Segment::Perp)));
        assert_eq!(map.resolve("ETH-USD"), Some((Coin::Eth, Segment::Spot)));
        assert_eq!(map.resolve("BTC-USD"), None);
    }

    #[test]
    fn test_mean_uses_sample_count() {
        let mut acc = WindowAccumulator::new(standard_map());
        acc.record(&tick("ETH-USD", dec!(10), dec!(12)));
        acc.record(&tick("ETH-USD", dec!(20), dec!(14)));
        acc.record(&tick("ETH-PERP", dec!(9), dec!(11)));

        let spreads = acc.finalize();
        assert_eq!(spreads.len(), 1);
        let (_, spread) = &spreads[0];
        assert_eq!(spread.spot_bid, dec!(15));
        assert_eq!(spread.spot_ask, dec!(13));
    }
}
