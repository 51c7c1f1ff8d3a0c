//! Per-coin futures spread writer.

use crate::error::StoreResult;
use chrono::Utc;
use finapi_core::{Coin, CoinSpread};
use sqlx::PgPool;
use tracing::debug;

/// Writer for per-coin futures spread tables.
#[derive(Debug, Clone)]
pub struct FuturesWriter {
    pool: PgPool,
}

impl FuturesWriter {
    /// Create a writer over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one spread row to the coin's table.
    ///
    /// The table name comes from the `Coin` enum (`btc_perp_futures`,
    /// `eth_perp_futures`), never from user input, so interpolating it into
    /// the statement is safe.
    pub async fn write_spread(&self, coin: Coin, spread: &CoinSpread) -> StoreResult<()> {
        let now = Utc::now();
        let statement = format!(
            r"
            INSERT INTO {} (
                epoch, timestamp, spot_bid, spot_ask, perp_bid, perp_ask
            ) VALUES (
                $1, $2, $3, $4, $5, $6
            )
            ",
            coin.table_name()
        );

        sqlx::query(&statement)
            .bind(now.timestamp())
            .bind(now)
            .bind(spread.spot_bid)
            .bind(spread.spot_ask)
            .bind(spread.perp_bid)
            .bind(spread.perp_ask)
            .execute(&self.pool)
            .await?;

        debug!(coin = %coin, "Spread row persisted");
        Ok(())
    }
}
