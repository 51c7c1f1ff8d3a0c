//! Postgres persistence for the finance data gateway.
//!
//! Two independent surfaces over one shared pool: the per-coin futures
//! spread writer and the transcript cache store. No transaction ever spans
//! both, and a write failure for one coin never blocks the other.
//!
//! The schema lives in `sql/schema.sql`.

pub mod error;
pub mod futures_writer;
pub mod pool;
pub mod transcript_store;

pub use error::{StoreError, StoreResult};
pub use futures_writer::FuturesWriter;
pub use pool::connect_pool;
pub use transcript_store::{TranscriptLookup, TranscriptStore};
