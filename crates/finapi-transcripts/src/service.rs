//! Cache-aside transcript service.

use crate::error::TranscriptResult;
use async_trait::async_trait;
use finapi_store::{StoreResult, TranscriptLookup, TranscriptStore};
use tracing::{debug, warn};

/// Cache side of the transcript flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptCache: Send + Sync {
    async fn lookup(&self, ticker: &str, year: i32, quarter: i32)
        -> StoreResult<TranscriptLookup>;
    async fn upsert(
        &self,
        ticker: &str,
        year: i32,
        quarter: i32,
        transcript: &str,
    ) -> StoreResult<()>;
}

#[async_trait]
impl TranscriptCache for TranscriptStore {
    async fn lookup(
        &self,
        ticker: &str,
        year: i32,
        quarter: i32,
    ) -> StoreResult<TranscriptLookup> {
        TranscriptStore::lookup(self, ticker, year, quarter).await
    }

    async fn upsert(
        &self,
        ticker: &str,
        year: i32,
        quarter: i32,
        transcript: &str,
    ) -> StoreResult<()> {
        TranscriptStore::upsert(self, ticker, year, quarter, transcript).await
    }
}

/// External source side of the transcript flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(
        &self,
        api_key: &str,
        ticker: &str,
        year: i32,
        quarter: i32,
    ) -> TranscriptResult<String>;
}

/// Cache-aside orchestration.
///
/// Behavior per cache state:
/// - `Hit`: return the stored text, no external call.
/// - `KnownAbsent`: return empty, no external call; an empty row records
///   that the upstream had nothing for this key.
/// - `Unset`: fetch; a successful result (even an empty one) is written
///   back. An upstream *failure* returns empty without writing back, so a
///   transient outage is never recorded as permanent absence.
pub struct TranscriptService<C, S> {
    cache: C,
    source: S,
}

impl<C: TranscriptCache, S: TranscriptSource> TranscriptService<C, S> {
    /// Create a service from its two sides.
    pub fn new(cache: C, source: S) -> Self {
        Self { cache, source }
    }

    /// Get the transcript for (ticker, year, quarter), empty string when
    /// unavailable.
    pub async fn get(
        &self,
        api_key: &str,
        ticker: &str,
        year: i32,
        quarter: i32,
    ) -> TranscriptResult<String> {
        let ticker = ticker.trim().to_uppercase();

        match self.cache.lookup(&ticker, year, quarter).await? {
            TranscriptLookup::Hit(text) => {
                debug!(ticker = %ticker, year, quarter, "Transcript served from store");
                Ok(text)
            }
            TranscriptLookup::KnownAbsent => {
                debug!(ticker = %ticker, year, quarter, "Transcript known absent");
                Ok(String::new())
            }
            TranscriptLookup::Unset => {
                debug!(ticker = %ticker, year, quarter, "Fetching transcript from upstream");

                match self.source.fetch(api_key, &ticker, year, quarter).await {
                    Ok(text) => {
                        if let Err(e) = self.cache.upsert(&ticker, year, quarter, &text).await {
                            // The fetched text still reaches the caller; the
                            // next request will just fetch again.
                            warn!(error = %e, "Transcript upsert failed");
                        }
                        Ok(text)
                    }
                    Err(e) => {
                        warn!(error = %e, ticker = %ticker, "Transcript fetch failed, not caching");
                        Ok(String::new())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscriptError;
    use mockall::predicate::eq;

    const KEY: &str = "api-key";

    #[tokio::test]
    async fn test_miss_fetches_once_and_upserts() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .with(eq("GOOGL"), eq(2027), eq(4))
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::Unset));
        source
            .expect_fetch()
            .with(eq(KEY), eq("GOOGL"), eq(2027), eq(4))
            .times(1)
            .returning(|_, _, _, _| Ok("call text".to_string()));
        cache
            .expect_upsert()
            .with(eq("GOOGL"), eq(2027), eq(4), eq("call text"))
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, " googl ", 2027, 4).await.unwrap();
        assert_eq!(text, "call text");
    }

    #[tokio::test]
    async fn test_hit_skips_external_fetch() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::Hit("cached".to_string())));
        source.expect_fetch().times(0);
        cache.expect_upsert().times(0);

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, "GOOGL", 2027, 4).await.unwrap();
        assert_eq!(text, "cached");
    }

    #[tokio::test]
    async fn test_known_absent_returns_empty_without_fetch() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::KnownAbsent));
        source.expect_fetch().times(0);
        cache.expect_upsert().times(0);

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, "GOOGL", 2027, 4).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_empty_upstream_result_is_cached() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::Unset));
        source
            .expect_fetch()
            .times(1)
            .returning(|_, _, _, _| Ok(String::new()));
        cache
            .expect_upsert()
            .with(eq("GOOGL"), eq(2027), eq(4), eq(""))
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, "GOOGL", 2027, 4).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::Unset));
        source
            .expect_fetch()
            .times(1)
            .returning(|_, _, _, _| Err(TranscriptError::Upstream("HTTP 500".to_string())));
        cache.expect_upsert().times(0);

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, "GOOGL", 2027, 4).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_upsert_failure_still_returns_text() {
        let mut cache = MockTranscriptCache::new();
        let mut source = MockTranscriptSource::new();

        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(TranscriptLookup::Unset));
        source
            .expect_fetch()
            .times(1)
            .returning(|_, _, _, _| Ok("call text".to_string()));
        cache
            .expect_upsert()
            .times(1)
            .returning(|_, _, _, _| Err(sqlx::Error::PoolClosed.into()));

        let service = TranscriptService::new(cache, source);
        let text = service.get(KEY, "GOOGL", 2027, 4).await.unwrap();
        assert_eq!(text, "call text");
    }
}
