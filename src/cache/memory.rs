//! Bounded TTL Memory Cache
//!
//! In-process key/value store with per-entry expiration and capacity-based
//! eviction. Reads perform their own lazy expiry check, so correctness never
//! depends on the periodic sweep.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheEntry;

// == Cache Stats ==
/// Point-in-time statistics, partitioned by expiry relative to "now" at call
/// time.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Raw entry count, including not-yet-swept expired entries
    pub total_entries: usize,
    /// Entries still within their TTL
    pub valid_entries: usize,
    /// Entries past their TTL but not yet removed
    pub expired_entries: usize,
    /// Configured capacity
    pub max_entries: usize,
    /// Default TTL in milliseconds; per-entry custom TTLs are not reflected
    pub default_ttl_ms: u64,
}

// == Memory Cache ==
/// Fast, process-local memoization of recently fetched values, bounded in
/// size and time.
///
/// When a `set` of a new key would exceed capacity, the entry with the
/// smallest `created_at` is evicted first (ties broken by first-found in
/// iteration order). Eviction runs synchronously before the insert, so the
/// entry count never exceeds `max_entries`.
#[derive(Debug)]
pub struct MemoryCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without an explicit one
    default_ttl: Duration,
}

impl<T: Clone> MemoryCache<T> {
    // == Constructor ==
    /// Creates a new cache with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl` (or the default TTL) from
    /// now.
    ///
    /// Overwriting an existing key refreshes both the value and its
    /// timestamps without counting as a new entry for capacity purposes.
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        let key = key.into();

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the stored value if present and not expired.
    ///
    /// Expired entries are deleted on detection and reported as absent; the
    /// read itself never fails.
    pub fn get(&mut self, key: &str) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    // == Has ==
    /// Same expiry check as `get` without cloning the value; also lazily
    /// deletes on expiry.
    pub fn has(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                return false;
            }
            return true;
        }
        false
    }

    // == Delete ==
    /// Removes an entry, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Current raw entry count (including not-yet-swept expired entries).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Scans all entries and partitions them by expiry at call time.
    pub fn stats(&self) -> CacheStats {
        let mut valid_entries = 0;
        let mut expired_entries = 0;

        for entry in self.entries.values() {
            if entry.is_expired() {
                expired_entries += 1;
            } else {
                valid_entries += 1;
            }
        }

        CacheStats {
            total_entries: self.entries.len(),
            valid_entries,
            expired_entries,
            max_entries: self.max_entries,
            default_ttl_ms: self.default_ttl.as_millis() as u64,
        }
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Advisory only: `get` and `has` do their own lazy expiry checks.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }

        count
    }

    // == Evict Oldest ==
    /// Drops the entry with the smallest `created_at`.
    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.created_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_cache_new() {
        let cache: MemoryCache<String> = MemoryCache::new(100, TTL);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_set_and_get() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("key1", "value1".to_string(), None);

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_missing() {
        let mut cache: MemoryCache<u32> = MemoryCache::new(100, TTL);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_cache_has() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("key1", 1u32, None);

        assert!(cache.has("key1"));
        assert!(!cache.has("key2"));
    }

    #[test]
    fn test_cache_delete() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("key1", 1u32, None);

        assert!(cache.delete("key1"));
        assert!(!cache.delete("key1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("key1", 1u32, None);
        cache.set("key2", 2u32, None);
        cache.clear();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_ttl_expiration_is_lazy() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("short", 1u32, Some(Duration::from_millis(50)));

        assert_eq!(cache.get("short"), Some(1));

        sleep(Duration::from_millis(100));

        // Entry still counted until a read or sweep observes the expiry
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_has_deletes_expired_entry() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("short", 1u32, Some(Duration::from_millis(50)));
        sleep(Duration::from_millis(100));

        assert!(!cache.has("short"));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_overwrite_does_not_grow_size() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("key1", "v1".to_string(), None);
        cache.set("key1", "v2".to_string(), None);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key1"), Some("v2".to_string()));
    }

    #[test]
    fn test_capacity_eviction_drops_oldest() {
        let mut cache = MemoryCache::new(2, TTL);

        cache.set("first", 1u32, None);
        sleep(Duration::from_millis(5));
        cache.set("second", 2u32, None);
        sleep(Duration::from_millis(5));
        cache.set("third", 3u32, None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("first"), None);
        assert_eq!(cache.get("second"), Some(2));
        assert_eq!(cache.get("third"), Some(3));
    }

    #[test]
    fn test_single_slot_cache() {
        let mut cache = MemoryCache::new(1, Duration::from_secs(1));

        cache.set("x", 42u32, None);
        sleep(Duration::from_millis(5));
        cache.set("y", 7u32, None);

        assert_eq!(cache.get("x"), None);
        assert_eq!(cache.get("y"), Some(7));
    }

    #[test]
    fn test_get_does_not_affect_eviction_order() {
        let mut cache = MemoryCache::new(2, TTL);

        cache.set("first", 1u32, None);
        sleep(Duration::from_millis(5));
        cache.set("second", 2u32, None);

        // Reading does not refresh creation time; "first" is still oldest
        assert_eq!(cache.get("first"), Some(1));
        sleep(Duration::from_millis(5));
        cache.set("third", 3u32, None);

        assert_eq!(cache.get("first"), None);
        assert_eq!(cache.get("second"), Some(2));
    }

    #[test]
    fn test_overwrite_refreshes_creation_time() {
        let mut cache = MemoryCache::new(2, TTL);

        cache.set("first", 1u32, None);
        sleep(Duration::from_millis(5));
        cache.set("second", 2u32, None);
        sleep(Duration::from_millis(5));

        // Overwriting "first" makes it the newest entry
        cache.set("first", 10u32, None);
        sleep(Duration::from_millis(5));
        cache.set("third", 3u32, None);

        assert_eq!(cache.get("second"), None);
        assert_eq!(cache.get("first"), Some(10));
        assert_eq!(cache.get("third"), Some(3));
    }

    #[test]
    fn test_stats_partitions_by_expiry() {
        let mut cache = MemoryCache::new(50, TTL);

        cache.set("valid", 1u32, None);
        cache.set("expired", 2u32, Some(Duration::from_millis(30)));

        sleep(Duration::from_millis(60));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.max_entries, 50);
        assert_eq!(stats.default_ttl_ms, 300_000);
    }

    #[test]
    fn test_sweep_expired() {
        let mut cache = MemoryCache::new(100, TTL);

        cache.set("short", 1u32, Some(Duration::from_millis(30)));
        cache.set("long", 2u32, Some(Duration::from_secs(60)));

        sleep(Duration::from_millis(60));

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(2));
    }
}
