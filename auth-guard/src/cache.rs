//! Bounded, expiring memo caches used by the validators.
//!
//! Entries expire a fixed time after insertion regardless of access. Once the
//! number of entries exceeds the capacity the oldest *inserted* entry is
//! evicted; reads do not refresh an entry's position.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cache entry with timestamp.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    /// Insertion sequence number; lowest is evicted first
    seq: u64,
}

/// Key to value map with TTL expiry and FIFO eviction.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
    capacity: usize,
    next_seq: u64,
    hits: u64,
    misses: u64,
}

impl<V: Clone> ExpiringCache<V> {
    /// Creates a cache with the default capacity (100) and TTL (60 s).
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity,
            next_seq: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Gets a live value, dropping it if it has expired.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                self.hits += 1;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        self.misses += 1;
        None
    }

    /// Inserts a value. Overwriting a key refreshes its expiry but keeps its
    /// eviction position.
    pub fn insert(&mut self, key: String, value: V) {
        let now = Instant::now();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.inserted_at = now;
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                seq,
            },
        );

        while self.entries.len() > self.capacity {
            self.evict_oldest();
        }
    }

    /// Clears the entire cache.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes expired entries.
    pub fn remove_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest_key) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.seq)
            .map(|(k, _)| k.clone())
        {
            self.entries.remove(&oldest_key);
        }
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.len();
        let expired_entries = self
            .entries
            .values()
            .filter(|entry| entry.inserted_at.elapsed() >= self.ttl)
            .count();

        CacheStats {
            total_entries,
            expired_entries,
            active_entries: total_entries - expired_entries,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<V: Clone> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of expired entries not yet removed
    pub expired_entries: usize,
    /// Number of active (non-expired) entries
    pub active_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic_operations() {
        let mut cache = ExpiringCache::new();

        cache.insert("test_key".to_string(), 42.0);
        assert_eq!(cache.get("test_key"), Some(42.0));
        assert_eq!(cache.get("missing_key"), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_cache_expiration() {
        let mut cache = ExpiringCache::with_config(Duration::from_millis(50), 10);

        cache.insert("test_key".to_string(), 42.0);
        assert_eq!(cache.get("test_key"), Some(42.0));

        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(cache.stats().expired_entries, 1);
        assert_eq!(cache.get("test_key"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fifo_eviction_ignores_reads() {
        let mut cache = ExpiringCache::with_config(Duration::from_secs(60), 2);

        cache.insert("key1".to_string(), 1);
        cache.insert("key2".to_string(), 2);
        // A read does not protect key1 from eviction
        assert_eq!(cache.get("key1"), Some(1));
        cache.insert("key3".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key("key1"));
        assert!(cache.contains_key("key2"));
        assert!(cache.contains_key("key3"));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut cache = ExpiringCache::with_config(Duration::from_secs(60), 2);

        cache.insert("key1".to_string(), 1);
        cache.insert("key2".to_string(), 2);
        cache.insert("key1".to_string(), 10);
        cache.insert("key3".to_string(), 3);

        assert!(!cache.contains_key("key1"));
        assert_eq!(cache.get("key2"), Some(2));
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut cache = ExpiringCache::new();
        for i in 0..250 {
            cache.insert(format!("key{i}"), i);
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        assert!(cache.contains_key("key249"));
        assert!(!cache.contains_key("key149"));
        assert!(cache.contains_key("key150"));
    }
}
