//! Core domain types for the finance data gateway.
//!
//! Contains the coin/segment vocabulary shared by the feed aggregator and
//! the persistence layer, plus request input validation helpers.

pub mod types;
pub mod validate;

pub use types::{Coin, CoinSpread, QuoteTick, Segment};
pub use validate::{is_valid_currency, is_valid_symbol_ticker, is_valid_ticker};
