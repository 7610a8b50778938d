//! # recency
//!
//! Fixed-capacity LRU cache engine.
//!
//! ## Architecture
//! - **Index**: AHash-keyed `HashMap` for O(1) lookups
//! - **Recency list**: arena-backed doubly-linked list for O(1) promotion and eviction
//! - **Session layer**: hit/miss accounting and capacity reconfiguration on top of the engine
//!
//! `get` is a mutating read: a hit promotes the entry to the MRU position.
//! Inserting into a full cache removes exactly the LRU entry, and every
//! `put` reports what it did through [`PutOutcome`]. The engine is
//! single-threaded by construction; all mutation goes through `&mut self`.

#![warn(missing_docs)]

mod error;
mod lru;
mod session;
mod stats;

pub use error::{Error, Result};
pub use lru::{Iter, LruCache, PutOutcome};
pub use session::CacheSession;
pub use stats::CacheStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface() {
        let mut cache = LruCache::new(2).unwrap();
        assert!(matches!(cache.put(1, "a"), PutOutcome::Inserted));
        assert_eq!(cache.get(&1), Some(&"a"));

        let mut session = CacheSession::new(2).unwrap();
        session.put(1, "a");
        assert_eq!(session.stats().inserts(), 1);
    }
}
