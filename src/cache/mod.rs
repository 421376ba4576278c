/// In-memory caching
///
/// Two caches sit in front of the network: resolved metadata per lookup key
/// (minutes) and raw listing lookups per URL (hours).
use std::time::Duration;

pub mod manager;

pub use manager::{system_clock, Clock, TtlCache};

/// Default lifetime of a resolution result
pub const RESOLUTION_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default lifetime of a raw API response used by support checks
pub const API_CACHE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}
