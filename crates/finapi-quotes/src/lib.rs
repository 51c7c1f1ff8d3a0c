//! REST fetchers for quote data.
//!
//! Three upstreams: the market-data API (FX conversion rates, intraday
//! prices, company overviews), and the scraped equity site whose raw page
//! body feeds the extraction engine. All outbound calls share a bounded
//! request timeout.

pub mod error;
pub mod format;
pub mod market_data;
pub mod scrape;

pub use error::{QuotesError, QuotesResult};
pub use format::format_market_cap;
pub use market_data::MarketDataClient;
pub use scrape::PageClient;
