//! Transcript cache store.
//!
//! Rows are keyed by (ticker, year, quarter). The lookup result is typed so
//! callers can tell a cached empty transcript (the upstream genuinely had
//! nothing; do not ask again) from a key that has never been fetched.

use crate::error::StoreResult;
use sqlx::{PgPool, Row};
use tracing::debug;

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLookup {
    /// A non-empty transcript is cached.
    Hit(String),
    /// A row exists with an empty transcript: the upstream had nothing for
    /// this key and re-fetching would be wasted work.
    KnownAbsent,
    /// No row for this key yet.
    Unset,
}

/// Postgres-backed transcript cache.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    pool: PgPool,
}

impl TranscriptStore {
    /// Create a store over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the cache entry for an exact (ticker, year, quarter) key.
    pub async fn lookup(
        &self,
        ticker: &str,
        year: i32,
        quarter: i32,
    ) -> StoreResult<TranscriptLookup> {
        let row = sqlx::query(
            r"
            SELECT transcript FROM earnings_call_transcripts
            WHERE ticker = $1 AND year = $2 AND quarter = $3
            ",
        )
        .bind(ticker)
        .bind(year)
        .bind(quarter)
        .fetch_optional(&self.pool)
        .await?;

        let lookup = match row {
            Some(row) => {
                let transcript: String = row.try_get("transcript")?;
                if transcript.is_empty() {
                    TranscriptLookup::KnownAbsent
                } else {
                    TranscriptLookup::Hit(transcript)
                }
            }
            None => TranscriptLookup::Unset,
        };

        debug!(ticker = %ticker, year, quarter, state = state_name(&lookup), "Transcript lookup");
        Ok(lookup)
    }

    /// Insert or overwrite the cache entry for a key.
    pub async fn upsert(
        &self,
        ticker: &str,
        year: i32,
        quarter: i32,
        transcript: &str,
    ) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO earnings_call_transcripts (ticker, year, quarter, transcript)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (ticker, year, quarter) DO UPDATE SET
                transcript = EXCLUDED.transcript
            ",
        )
        .bind(ticker)
        .bind(year)
        .bind(quarter)
        .bind(transcript)
        .execute(&self.pool)
        .await?;

        debug!(ticker = %ticker, year, quarter, "Transcript upserted");
        Ok(())
    }
}

fn state_name(lookup: &TranscriptLookup) -> &'static str {
    match lookup {
        TranscriptLookup::Hit(_) => "hit",
        TranscriptLookup::KnownAbsent => "known-absent",
        TranscriptLookup::Unset => "unset",
    }
}
