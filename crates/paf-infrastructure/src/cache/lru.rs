//! Least-recently-used eviction cache
//!
//! Fixed capacity map whose entries are threaded through an index-linked
//! recency list stored in an arena. Lookups and insertions promote the entry to
//! the head; inserting a new key into a full cache evicts the tail first.
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `try_get` (hit or miss) | O(1) |
//! | `add_or_replace` | O(1) amortized |
//! | eviction | O(1) |
//! | `clear` | O(n) |
//!
//! [`EvictionCache`] needs `&mut self` for every lookup because a hit reorders
//! the list. [`ConcurrentEvictionCache`] wraps it in a mutex for shared use.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

use paf_domain::error::{Error, Result};

/// Index into the slot arena
type SlotIndex = usize;

/// Sentinel for a missing link
const NIL: SlotIndex = usize::MAX;

/// One cache entry with its recency links
struct Slot<K, V> {
    key: K,
    value: V,
    /// Neighbour used more recently, `NIL` for the head
    more_recent: SlotIndex,
    /// Neighbour used less recently, `NIL` for the tail
    less_recent: SlotIndex,
}

/// Capacity-bounded map with least-recently-used eviction
pub struct EvictionCache<K, V> {
    capacity: usize,
    slots: Vec<Slot<K, V>>,
    index: HashMap<K, SlotIndex>,
    /// Most recently used slot
    head: SlotIndex,
    /// Least recently used slot
    tail: SlotIndex,
}

impl<K, V> EvictionCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache; `capacity` must be positive
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::configuration(
                "Eviction cache capacity should be greater than zero",
            ));
        }

        Ok(Self {
            capacity,
            slots: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
        })
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Insert or update `key`, promoting it to most recently used
    ///
    /// Returns the entry evicted to make room, if any. Replacing an existing
    /// key never evicts.
    pub fn add_or_replace(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            self.slots[idx].value = value;
            self.promote(idx);
            return None;
        }

        let slot = Slot {
            key: key.clone(),
            value,
            more_recent: NIL,
            less_recent: NIL,
        };

        let (idx, evicted) = if self.index.len() == self.capacity {
            // Full: the least recently used slot is reused in place
            let idx = self.tail;
            self.unlink(idx);
            let old = std::mem::replace(&mut self.slots[idx], slot);
            self.index.remove(&old.key);
            (idx, Some((old.key, old.value)))
        } else {
            self.slots.push(slot);
            (self.slots.len() - 1, None)
        };

        self.index.insert(key, idx);
        self.push_head(idx);
        evicted
    }

    /// Look up `key`, promoting it to most recently used on a hit
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        Some(&self.slots[idx].value)
    }

    /// Whether `key` is cached, without touching recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Keys ordered from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while cursor != NIL {
            let slot = &self.slots[cursor];
            keys.push(slot.key.clone());
            cursor = slot.less_recent;
        }
        keys
    }

    fn promote(&mut self, idx: SlotIndex) {
        if idx == self.head {
            return;
        }
        self.unlink(idx);
        self.push_head(idx);
    }

    fn unlink(&mut self, idx: SlotIndex) {
        let more_recent = self.slots[idx].more_recent;
        let less_recent = self.slots[idx].less_recent;

        if more_recent == NIL {
            self.head = less_recent;
        } else {
            self.slots[more_recent].less_recent = less_recent;
        }

        if less_recent == NIL {
            self.tail = more_recent;
        } else {
            self.slots[less_recent].more_recent = more_recent;
        }

        self.slots[idx].more_recent = NIL;
        self.slots[idx].less_recent = NIL;
    }

    fn push_head(&mut self, idx: SlotIndex) {
        self.slots[idx].more_recent = NIL;
        self.slots[idx].less_recent = self.head;

        if self.head != NIL {
            self.slots[self.head].more_recent = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

impl<K, V> fmt::Debug for EvictionCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionCache")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .finish()
    }
}

/// Thread-safe [`EvictionCache`]
///
/// Every operation holds an internal mutex for its O(1) duration only, so
/// callers never wait on anything but another lookup or insertion.
pub struct ConcurrentEvictionCache<K, V> {
    inner: Mutex<EvictionCache<K, V>>,
}

impl<K, V> ConcurrentEvictionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache; `capacity` must be positive
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(EvictionCache::new(capacity)?),
        })
    }

    /// Look up `key`, cloning the value out and promoting the entry
    pub fn try_get(&self, key: &K) -> Option<V> {
        self.lock().try_get(key).cloned()
    }

    /// Insert or update `key`, returning the evicted entry if any
    pub fn add_or_replace(&self, key: K, value: V) -> Option<(K, V)> {
        self.lock().add_or_replace(key, value)
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Keys ordered from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.lock().keys_by_recency()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EvictionCache<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> fmt::Debug for ConcurrentEvictionCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentEvictionCache").finish_non_exhaustive()
    }
}
