//! Market-data feed aggregation.
//!
//! Parses ticker frames from the streaming feed and accumulates a fixed,
//! timer-bounded window of bid/ask samples per (coin, segment) bucket. The
//! accumulator is constructed inside each aggregation call and consumed by
//! it; nothing here is shared across requests.

pub mod aggregator;
pub mod error;
pub mod parser;
pub mod window;

pub use aggregator::{ProductMap, WindowAccumulator};
pub use error::{FeedError, FeedResult};
pub use parser::parse_ticker;
pub use window::collect_spreads;
