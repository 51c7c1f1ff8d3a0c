//! Authenticated HTTP gateway for aggregated financial data.
//!
//! Thin axum layer over the worker crates: token auth, input validation,
//! response formatting and the remote access log. All real work happens in
//! the feed aggregator, the extraction engine and the fetcher crates.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use routes::{create_router, run_server};
pub use state::AppState;
