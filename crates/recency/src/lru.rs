//! LRU (Least Recently Used) cache engine
//!
//! Hash index plus an arena-backed doubly-linked list: a lookup is one hash
//! probe, promotion and eviction are O(1) relinks. List links are slot
//! indices into the arena rather than pointers, and vacated slots are
//! recycled through a free list, so the arena never grows past capacity.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::error::{Error, Result};

/// Node in the recency list arena
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Report returned by [`LruCache::put`] describing what the call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K> {
    /// The key was new and the cache had room; a fresh entry now sits at
    /// the MRU position.
    Inserted,
    /// The key was already cached; its value was overwritten in place and
    /// the entry was promoted. Size is unchanged and nothing was evicted.
    Updated,
    /// The key was new but the cache was full; the carried key was removed
    /// from the LRU position to make room.
    Evicted(K),
}

impl<K> PutOutcome<K> {
    /// True when the call overwrote an existing entry.
    pub fn was_update(&self) -> bool {
        matches!(self, PutOutcome::Updated)
    }

    /// Key removed to make room, if the call evicted one.
    pub fn evicted_key(&self) -> Option<&K> {
        match self {
            PutOutcome::Evicted(key) => Some(key),
            _ => None,
        }
    }
}

/// Fixed-capacity LRU cache with O(1) lookup, insertion, and eviction.
///
/// The capacity is set once at construction; changing it means discarding
/// the instance and building a new one. Each instance owns its entries
/// outright and shares no state with any other instance.
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache that holds at most `capacity` entries.
    ///
    /// Fails with [`Error::InvalidCapacity`] when `capacity` is zero; no
    /// partial cache is produced.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Look up a key, promoting its entry to the MRU position on a hit.
    ///
    /// The promotion is a deliberate mutation of the recency order; use
    /// [`peek`](Self::peek) for an order-preserving read. A miss changes
    /// nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Look up a key without touching the recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Whether the key is currently cached. Does not promote.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or update an entry, reporting what happened.
    ///
    /// A present key is overwritten in place and promoted; size never
    /// changes and nothing is evicted, even when the cache is full. An
    /// absent key is linked at the MRU position; if the cache was full,
    /// the LRU entry is removed first and its key is reported through
    /// [`PutOutcome::Evicted`]. Size never exceeds capacity.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_front(idx);
            return PutOutcome::Updated;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.alloc_slot();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.map.insert(key, idx);

        match evicted {
            Some(old_key) => PutOutcome::Evicted(old_key),
            None => PutOutcome::Inserted,
        }
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries at once.
    ///
    /// This is a bulk clear, not an eviction: nothing is reported. The
    /// capacity is unchanged and the cache is immediately reusable.
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate over entries from most-recently-used to least-recently-used.
    ///
    /// The walk is read-only: it does not promote anything, and two walks
    /// with no mutation in between yield identical sequences. The last
    /// yielded key is the next eviction candidate.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.map.len(),
        }
    }

    /// Owned copy of the current entries, ordered MRU to LRU.
    ///
    /// Same order and read-only contract as [`iter`](Self::iter).
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    // Unlink while the node is still in its slot, then vacate it; the
    // reverse order would leave tail and the neighbor links pointing at a
    // recycled slot.
    fn evict_lru(&mut self) -> Option<K> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let node = self.nodes[tail_idx].take()?;
        self.map.remove(&node.key);
        self.free_list.push(tail_idx);
        Some(node.key)
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            self.nodes.push(None);
            self.nodes.len() - 1
        }
    }
}

/// Borrowed iterator over cache entries, most-recently-used first.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.nodes[idx].as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
