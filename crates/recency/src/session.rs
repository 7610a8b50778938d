//! Cache session: one engine instance plus the counters that observe it

use std::hash::Hash;

use crate::error::Result;
use crate::lru::{LruCache, PutOutcome};
use crate::stats::CacheStats;

/// A cache instance with hit/miss accounting and capacity reconfiguration.
///
/// The session outlives the cache it wraps: changing capacity discards the
/// current entries and installs a fresh engine, while the counters keep
/// accumulating across the swap. Every lookup and insertion is recorded.
pub struct CacheSession<K, V> {
    cache: LruCache<K, V>,
    stats: CacheStats,
}

impl<K, V> CacheSession<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a session around an empty cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be at least 1
    ///
    /// # Returns
    /// * `Result<CacheSession>` - Session handle, or `InvalidCapacity`
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            cache: LruCache::new(capacity)?,
            stats: CacheStats::new(),
        })
    }

    /// Look up a key, recording a hit or a miss.
    ///
    /// A hit promotes the entry to the MRU position, exactly as
    /// [`LruCache::get`] does.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.cache.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert or update an entry, recording what happened.
    ///
    /// An evicting insertion counts as both an insert and an eviction.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K> {
        let outcome = self.cache.put(key, value);
        match &outcome {
            PutOutcome::Inserted => self.stats.record_insert(),
            PutOutcome::Updated => self.stats.record_update(),
            PutOutcome::Evicted(_) => {
                self.stats.record_insert();
                self.stats.record_eviction();
            }
        }
        outcome
    }

    /// Drop all entries, keeping capacity and counters.
    ///
    /// A reset is a bulk clear: the eviction counter does not move.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Replace the cache with an empty one of the given capacity.
    ///
    /// Prior entries are always discarded; there is no migration into the
    /// resized cache. On `InvalidCapacity` the current cache is left
    /// untouched. Counters survive the swap.
    ///
    /// # Arguments
    /// * `capacity` - New maximum number of entries, must be at least 1
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        self.cache = LruCache::new(capacity)?;
        Ok(())
    }

    /// Owned copy of the current entries, ordered MRU to LRU.
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.cache.snapshot()
    }

    /// The wrapped engine, for read-only inspection.
    pub fn cache(&self) -> &LruCache<K, V> {
        &self.cache
    }

    /// Session counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Current maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_session_records_lookups() {
        let mut session = CacheSession::new(2).unwrap();

        session.put(1, "a");
        session.get(&1);
        session.get(&1);
        session.get(&9);

        assert_eq!(session.stats().hits(), 2);
        assert_eq!(session.stats().misses(), 1);
        assert!((session.stats().hit_ratio() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_records_writes() {
        let mut session = CacheSession::new(2).unwrap();

        session.put(1, "a");
        session.put(2, "b");
        session.put(1, "a2");
        session.put(3, "c");

        assert_eq!(session.stats().inserts(), 3);
        assert_eq!(session.stats().updates(), 1);
        assert_eq!(session.stats().evictions(), 1);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_session_reset_keeps_counters() {
        let mut session = CacheSession::new(2).unwrap();

        session.put(1, "a");
        session.put(2, "b");
        session.put(3, "c");
        assert_eq!(session.stats().evictions(), 1);

        session.reset();

        assert_eq!(session.len(), 0);
        assert!(session.snapshot().is_empty());
        assert_eq!(session.stats().evictions(), 1);
        assert_eq!(session.stats().inserts(), 3);
        assert_eq!(session.capacity(), 2);
    }

    #[test]
    fn test_session_set_capacity_discards_entries() {
        let mut session = CacheSession::new(2).unwrap();

        session.put(1, "a");
        session.put(2, "b");
        session.set_capacity(5).unwrap();

        assert_eq!(session.len(), 0);
        assert_eq!(session.capacity(), 5);
        assert_eq!(session.stats().inserts(), 2);
    }

    #[test]
    fn test_session_set_capacity_zero_rejected() {
        let mut session = CacheSession::new(2).unwrap();
        session.put(1, "a");

        let result = session.set_capacity(0);

        assert!(matches!(result, Err(Error::InvalidCapacity(0))));
        assert_eq!(session.len(), 1);
        assert_eq!(session.capacity(), 2);
        assert_eq!(session.get(&1), Some(&"a"));
    }

    #[test]
    fn test_session_snapshot_order() {
        let mut session = CacheSession::new(3).unwrap();

        session.put(1, "a");
        session.put(2, "b");
        session.get(&1);

        assert_eq!(session.snapshot(), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_independent_sessions() {
        let mut left = CacheSession::new(2).unwrap();
        let mut right = CacheSession::new(2).unwrap();

        left.put(1, "a");
        right.put(1, "z");
        left.get(&1);

        assert_eq!(left.cache().peek(&1), Some(&"a"));
        assert_eq!(right.cache().peek(&1), Some(&"z"));
        assert_eq!(right.stats().hits(), 0);
    }
}
