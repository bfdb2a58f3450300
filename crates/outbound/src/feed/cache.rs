use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;

use super::source::FeedSource;
use super::table::RawTable;
use crate::error::FeedError;
use crate::sanitize;

/// A handful of feed locations per process is the expected case.
const MAX_CACHED_FEEDS: u64 = 16;

#[derive(Clone)]
struct CachedTable {
    table: Arc<RawTable>,
    fetched_at: DateTime<Utc>,
}

/// Process-wide cache of fetched feed tables, keyed by location.
///
/// Entries expire after the configured time-to-live; [`FeedCache::invalidate`]
/// drops everything immediately (the manual "refresh" path). Cached tables are
/// shared read-only through `Arc`, nothing downstream mutates them.
pub struct FeedCache {
    source: Box<dyn FeedSource>,
    tables: Cache<String, CachedTable>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(source: Box<dyn FeedSource>, ttl: Duration) -> Self {
        let tables = Cache::builder()
            .max_capacity(MAX_CACHED_FEEDS)
            .time_to_live(ttl)
            .build();
        Self {
            source,
            tables,
            ttl,
        }
    }

    /// Returns the cached table for `location`, fetching it on a miss.
    ///
    /// Concurrent misses on the same location share one source fetch. Failed
    /// fetches are not cached; callers that waited on a failed fetch get
    /// [`FeedError::SharedFetch`].
    pub fn fetch(&self, location: &str) -> Result<Arc<RawTable>, FeedError> {
        let mut failure = None;
        let cached = self.tables.try_get_with_by_ref(location, || {
            log::debug!(
                "Feed cache miss for {} ({})",
                sanitize::redact_url(location),
                sanitize::hash_location(location)
            );
            match self.source.fetch(location) {
                Ok(table) => Ok(CachedTable {
                    table: Arc::new(table),
                    fetched_at: Utc::now(),
                }),
                Err(e) => {
                    let message = e.to_string();
                    failure = Some(e);
                    Err(message)
                }
            }
        });

        match cached {
            Ok(cached) => Ok(cached.table),
            Err(message) => Err(failure
                .take()
                .unwrap_or_else(|| FeedError::SharedFetch(message.to_string()))),
        }
    }

    /// When the cached table for `location` was fetched, if it is cached.
    pub fn fetched_at(&self, location: &str) -> Option<DateTime<Utc>> {
        self.tables.get(location).map(|cached| cached.fetched_at)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.tables.contains_key(location)
    }

    /// Drops every cached table.
    pub fn invalidate(&self) {
        log::info!("Feed cache invalidated");
        self.tables.invalidate_all();
    }

    /// Drops the cached table for one location.
    pub fn invalidate_location(&self, location: &str) {
        self.tables.invalidate(location);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl FeedSource for CountingSource {
        fn fetch(&self, _location: &str) -> Result<RawTable, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FeedError::Empty);
            }
            Ok(RawTable::new(
                vec!["JOB Num".to_string()],
                vec![vec!["J1".to_string()]],
            ))
        }
    }

    fn cache_with(fail: bool, ttl: Duration) -> (FeedCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            fail,
        };
        (FeedCache::new(Box::new(source), ttl), calls)
    }

    #[test]
    fn test_second_fetch_is_served_from_cache() {
        let (cache, calls) = cache_with(false, Duration::from_secs(300));
        let first = cache.fetch("feed").unwrap();
        let second = cache.fetch("feed").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.fetched_at("feed").is_some());
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let (cache, calls) = cache_with(false, Duration::from_secs(300));
        cache.fetch("feed").unwrap();
        cache.invalidate();
        assert!(!cache.contains("feed"));
        cache.fetch("feed").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_location_only_drops_that_feed() {
        let (cache, calls) = cache_with(false, Duration::from_secs(300));
        cache.fetch("a").unwrap();
        cache.fetch("b").unwrap();
        cache.invalidate_location("a");
        cache.fetch("a").unwrap();
        cache.fetch("b").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_ttl_expiry_refetches() {
        let (cache, calls) = cache_with(false, Duration::from_millis(50));
        cache.fetch("feed").unwrap();
        std::thread::sleep(Duration::from_millis(120));
        cache.fetch("feed").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    struct SlowSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl FeedSource for SlowSource {
        fn fetch(&self, _location: &str) -> Result<RawTable, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(100));
            if self.fail {
                return Err(FeedError::Empty);
            }
            Ok(RawTable::new(
                vec!["JOB Num".to_string()],
                vec![vec!["J1".to_string()]],
            ))
        }
    }

    fn fetch_concurrently(fail: bool) -> (Vec<Result<Arc<RawTable>, FeedError>>, usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowSource {
            calls: Arc::clone(&calls),
            fail,
        };
        let cache = Arc::new(FeedCache::new(Box::new(source), Duration::from_secs(300)));
        let barrier = Arc::new(std::sync::Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache.fetch("feed")
                })
            })
            .collect();
        let results = handles
            .into_iter()
            .map(|h| h.join().expect("fetch thread panicked"))
            .collect();
        (results, calls.load(Ordering::SeqCst))
    }

    #[test]
    fn test_concurrent_misses_share_one_fetch() {
        let (results, calls) = fetch_concurrently(false);
        assert_eq!(calls, 1);
        let tables: Vec<Arc<RawTable>> = results.into_iter().map(|r| r.unwrap()).collect();
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }

    #[test]
    fn test_concurrent_failure_reaches_every_caller() {
        let (results, calls) = fetch_concurrently(true);
        assert_eq!(calls, 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(FeedError::Empty)))
                .count(),
            1
        );
        assert!(results.iter().all(|r| matches!(
            r,
            Err(FeedError::Empty) | Err(FeedError::SharedFetch(_))
        )));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let (cache, calls) = cache_with(true, Duration::from_secs(300));
        assert!(cache.fetch("feed").is_err());
        assert!(cache.fetch("feed").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.fetched_at("feed").is_none());
    }
}
