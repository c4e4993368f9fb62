//! In-memory caches shared between request handlers and scraper tasks.
//!
//! Two independent caches exist:
//!
//! | Cache | Key | Lifetime | Owner |
//! |-------|-----|----------|-------|
//! | [`BodyCache`] | request URL | life of the process | [`Fetcher`](crate::fetcher::Fetcher) |
//! | [`ResultCache`] | single slot | [`RESULT_TTL`] (one minute) | HTTP gateway |
//!
//! Both are owned by `main` and handed out behind an `Arc`; neither is a
//! global. Both synchronize internally so concurrent readers never observe a
//! half-written entry.
//!
//! # Caveat
//!
//! [`BodyCache`] never evicts. That holds up only while the set of fetched
//! URLs is small and fixed (one per configured source). If sources become
//! dynamic it needs an LRU or TTL bound.

use crate::models::AggregateResult;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long an aggregated result is served before it is recomputed.
pub const RESULT_TTL: Duration = Duration::from_secs(60);

/// A cached value together with the instant it was stored.
///
/// Ages are measured on the monotonic clock, so wall-clock steps never make
/// an expired entry look fresh again.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Wrap `value`, stamping it with the current instant.
    pub fn new(value: T) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    /// How long ago the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// `true` while the entry is younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Memo of raw response bodies keyed by request URL.
///
/// Entries never expire; a URL is fetched from the network at most once
/// after its first successful fetch.
#[derive(Debug, Default)]
pub struct BodyCache {
    entries: DashMap<String, CacheEntry<Bytes>>,
}

impl BodyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.entries.get(url).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, url: &str, body: Bytes) {
        self.entries.insert(url.to_string(), CacheEntry::new(body));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single-slot, time-to-live cache over the most recent aggregation.
///
/// Expiry is checked lazily on read: a stale entry stays in memory until the
/// next [`put`](ResultCache::put) but is never returned.
#[derive(Debug)]
pub struct ResultCache {
    slot: RwLock<Option<CacheEntry<AggregateResult>>>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            ttl: RESULT_TTL,
        }
    }

    /// Return the stored result if one exists and is younger than the TTL.
    ///
    /// `Some` is a cache hit, `None` a miss.
    pub fn get(&self) -> Option<AggregateResult> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(entry) if entry.is_fresh(self.ttl) => Some(entry.value.clone()),
            Some(entry) => {
                debug!(age_secs = entry.age().as_secs(), "Cached headlines expired");
                None
            }
            None => None,
        }
    }

    /// Replace the stored result and reset its timestamp.
    pub fn put(&self, result: AggregateResult) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheEntry::new(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeadlineItem, SourceMetadata, SourceResult};
    use std::sync::Arc;

    fn sample_result() -> AggregateResult {
        vec![SourceResult {
            metadata: SourceMetadata {
                name: "Test Source".to_string(),
                logo_url: "http://example.com/logo.png".to_string(),
                homepage_url: "http://example.com".to_string(),
            },
            items: vec![
                HeadlineItem::new("Test Headline 1", "http://example.com/1"),
                HeadlineItem::new("Test Headline 2", "http://example.com/2"),
            ],
        }]
    }

    fn ago(by: Duration) -> Instant {
        Instant::now()
            .checked_sub(by)
            .expect("monotonic clock too close to its origin")
    }

    fn backdate(cache: &ResultCache, by: Duration) {
        let mut slot = cache.slot.write().unwrap();
        if let Some(entry) = slot.as_mut() {
            entry.created_at = ago(by);
        }
    }

    #[test]
    fn test_new_entry_is_fresh() {
        let entry = CacheEntry::new(42);
        assert!(entry.is_fresh(RESULT_TTL));
    }

    #[test]
    fn test_entry_stale_after_ttl() {
        let mut entry = CacheEntry::new(42);
        entry.created_at = ago(Duration::from_secs(61));
        assert!(!entry.is_fresh(RESULT_TTL));
    }

    #[test]
    fn test_entry_age_is_monotonic() {
        let mut entry = CacheEntry::new(42);
        entry.created_at = ago(Duration::from_secs(90));
        let first = entry.age();
        let second = entry.age();
        assert!(first >= Duration::from_secs(90));
        assert!(second >= first);
        assert!(!entry.is_fresh(RESULT_TTL));
    }

    #[test]
    fn test_result_cache_empty_is_miss() {
        let cache = ResultCache::new();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_result_cache_put_then_get_hits() {
        let cache = ResultCache::new();
        cache.put(sample_result());
        assert_eq!(cache.get(), Some(sample_result()));
    }

    #[test]
    fn test_result_cache_expires_after_ttl() {
        let cache = ResultCache::new();
        cache.put(sample_result());
        backdate(&cache, RESULT_TTL + Duration::from_secs(1));
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_result_cache_still_fresh_just_before_ttl() {
        let cache = ResultCache::new();
        cache.put(sample_result());
        backdate(&cache, Duration::from_secs(50));
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_result_cache_put_overwrites_and_resets_timestamp() {
        let cache = ResultCache::new();
        cache.put(sample_result());
        backdate(&cache, RESULT_TTL + Duration::from_secs(1));

        let mut replacement = sample_result();
        replacement[0].items.truncate(1);
        cache.put(replacement.clone());

        assert_eq!(cache.get(), Some(replacement));
    }

    #[test]
    fn test_result_cache_concurrent_put_and_get() {
        let cache = Arc::new(ResultCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            cache.put(sample_result());
                        } else if let Some(result) = cache.get() {
                            assert_eq!(result, sample_result());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.get(), Some(sample_result()));
    }

    #[test]
    fn test_body_cache_insert_and_get() {
        let cache = BodyCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get("http://example.com"), None);

        cache.insert("http://example.com", Bytes::from_static(b"<html></html>"));
        assert_eq!(
            cache.get("http://example.com"),
            Some(Bytes::from_static(b"<html></html>"))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_body_cache_one_entry_per_url() {
        let cache = BodyCache::new();
        cache.insert("http://a.example", Bytes::from_static(b"a"));
        cache.insert("http://a.example", Bytes::from_static(b"a2"));
        cache.insert("http://b.example", Bytes::from_static(b"b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("http://a.example"), Some(Bytes::from_static(b"a2")));
    }
}
