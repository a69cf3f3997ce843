//! # Cache Trait Seams
//!
//! Three traits cover the crate's seams:
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize      capacity(&)        │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   └─────────────────────────────────────────┘
//!
//!   ┌─────────────────────────────────────────┐
//!   │          CacheService<K, V>             │     outward capability:
//!   │                                         │     shared-reference access,
//!   │  put(&self, K, V) → Option<V>           │     put and get only — no
//!   │  get(&self, &K) → Option<V>             │     removal, eviction, or
//!   └─────────────────────────────────────────┘     statistics surface
//! ```
//!
//! [`CoreCache`] and [`MutableCache`] describe the single-threaded core and
//! take `&mut self`, letting the borrow checker enforce exclusivity.
//! [`CacheService`] is the only interface handed to generic callers: a
//! shared-reference put/get capability backed by an internally synchronized
//! cache, returning owned values.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use lfukit::traits::CoreCache;
/// use lfukit::policy::lfu::LfuCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LfuCache::new(100, 0.25);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// existed.
    ///
    /// At capacity, inserting a new key first evicts entries according to
    /// the cache's policy.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10, 0.5);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates eviction-relevant state (here: access frequency). Use
    /// [`contains`](Self::contains) to check existence without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lfukit::traits::{CoreCache, MutableCache};
/// use lfukit::policy::lfu::LfuCache;
///
/// fn invalidate<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100, 0.25);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair, returning the removed value if
    /// the key existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; returns the number actually removed.
    fn remove_batch(&mut self, keys: &[K]) -> usize {
        let mut removed = 0;
        for key in keys {
            if self.remove(key).is_some() {
                removed += 1;
            }
        }
        removed
    }
}

/// The outward cache capability: put and get through a shared reference.
///
/// This is the only interface generic callers receive. It deliberately
/// exposes no removal, eviction, or statistics surface, and it returns
/// owned values so the backing lock is released before the caller touches
/// them.
///
/// # Example
///
/// ```
/// use lfukit::service::LfuCacheService;
/// use lfukit::traits::CacheService;
///
/// fn lookup_or_compute<S: CacheService<u64, String>>(service: &S, key: u64) -> String {
///     if let Some(hit) = service.get(&key) {
///         return hit;
///     }
///     let value = format!("value-{key}");
///     service.put(key, value.clone());
///     value
/// }
///
/// let service = LfuCacheService::new(16, 0.5);
/// assert_eq!(lookup_or_compute(&service, 7), "value-7");
/// assert_eq!(lookup_or_compute(&service, 7), "value-7");
/// ```
pub trait CacheService<K, V> {
    /// Stores a value, returning the previous value for the key if any.
    fn put(&self, key: K, value: V) -> Option<V>;

    /// Fetches a value, promoting the entry's access frequency.
    fn get(&self, key: &K) -> Option<V>;
}
