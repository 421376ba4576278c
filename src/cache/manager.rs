/// Time-bounded key/value cache
use super::CacheStats;
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Millisecond clock; injectable so expiry can be tested without sleeping
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().timestamp_millis())
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    stored_at_ms: i64,
}

/// Thread-safe TTL cache
///
/// Entries expire lazily: an entry older than the TTL is removed by the `get`
/// that finds it. Writes always replace the previous entry.
pub struct TtlCache<T: Clone> {
    name: &'static str,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl_ms: i64,
    clock: Clock,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self::with_clock(name, ttl, system_clock())
    }

    pub fn with_clock(name: &'static str, ttl: Duration, clock: Clock) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Get a copy of the cached value if present and not expired
    pub fn get(&self, key: &str) -> Option<T> {
        let now = (self.clock)();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            Some(entry) => now - entry.stored_at_ms > self.ttl_ms,
        };

        if expired {
            entries.remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            logger::debug(
                LogTag::Cache,
                &format!("{}: entry '{}' expired", self.name, key),
            );
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        entries.get(key).map(|entry| entry.data.clone())
    }

    /// Store a value stamped with the current time
    pub fn set(&self, key: impl Into<String>, data: T) {
        let entry = CacheEntry {
            data,
            stored_at_ms: (self.clock)(),
        };
        self.entries.lock().insert(key.into(), entry);
    }

    /// Check if key exists and is still valid (does not evict)
    pub fn contains(&self, key: &str) -> bool {
        let now = (self.clock)();
        self.entries
            .lock()
            .get(key)
            .map(|entry| now - entry.stored_at_ms <= self.ttl_ms)
            .unwrap_or(false)
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        self.evictions
            .fetch_add(entries.len() as u64, Ordering::Relaxed);
        entries.clear();
    }

    /// Number of stored entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI64;

    fn manual_clock() -> (Arc<AtomicI64>, Clock) {
        let now = Arc::new(AtomicI64::new(1_000));
        let handle = now.clone();
        (now, Arc::new(move || handle.load(Ordering::SeqCst)))
    }

    #[test]
    fn test_get_within_ttl() {
        let (now, clock) = manual_clock();
        let cache = TtlCache::with_clock("test", Duration::from_secs(60), clock);
        cache.set("doge", vec!["wow".to_string()]);

        let first = cache.get("doge");
        now.store(30_000, Ordering::SeqCst);
        let second = cache.get("doge");
        assert_eq!(first, Some(vec!["wow".to_string()]));
        assert_eq!(first, second);
        assert!(cache.contains("doge"));
        assert_eq!(cache.get_stats().hits, 2);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let (now, clock) = manual_clock();
        let cache = TtlCache::with_clock("test", Duration::from_millis(500), clock);
        cache.set("doge", "wow".to_string());

        now.store(1_500, Ordering::SeqCst);
        assert_eq!(cache.get("doge"), Some("wow".to_string()));

        now.store(1_501, Ordering::SeqCst);
        assert!(!cache.contains("doge"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("doge"), None);
        assert_eq!(cache.len(), 0);

        let stats = cache.get_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_set_replaces_and_restamps() {
        let (now, clock) = manual_clock();
        let cache = TtlCache::with_clock("test", Duration::from_millis(100), clock);
        cache.set("k", 1);
        now.store(1_090, Ordering::SeqCst);
        cache.set("k", 2);
        now.store(1_150, Ordering::SeqCst);
        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::new("test", Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
