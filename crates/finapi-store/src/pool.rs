//! Connection pool construction.

use crate::error::StoreResult;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Build the shared Postgres pool.
///
/// Connections are established lazily so the gateway can start while the
/// database is still coming up; the bounded acquire timeout keeps a dead
/// database from hanging request handlers.
pub fn connect_pool(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url)?;

    info!("Postgres pool configured");
    Ok(pool)
}
