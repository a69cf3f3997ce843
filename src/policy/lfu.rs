//! # Bucketed LFU cache with factor-driven eviction
//!
//! Fixed-capacity key-value cache that evicts least-frequently-used entries
//! in amortized O(1) per operation. Frequencies are tracked in a fixed array
//! of insertion-ordered buckets (see
//! [`FrequencyBuckets`](crate::ds::FrequencyBuckets)); no heap, no sorted
//! index.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        LfuCache<K, V>                            │
//!   │                                                                  │
//!   │   FrequencyBuckets<K, V>                                         │
//!   │     entries arena + FxHashMap index + Vec of `capacity` buckets  │
//!   │     + lowest-frequency cursor                                    │
//!   │                                                                  │
//!   │   capacity        1..=100_000, fixed                             │
//!   │   eviction_factor (0, 1): fraction of capacity per eviction pass │
//!   │   stats           LfuStats (per instance, no globals)            │
//!   │   listener        Arc<dyn CacheListener> (removal/report events) │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Behavior
//!
//! | Operation        | Effect                                                    |
//! |------------------|-----------------------------------------------------------|
//! | `put` (new key)  | evict if full, insert at frequency 0, time the insertion  |
//! | `put` (existing) | replace value in place; frequency and position unchanged  |
//! | `get`            | promote one bucket up, capped at `capacity - 1`           |
//! | `get` (at cap)   | re-append within the bucket: recency order among peers    |
//! | `remove`         | drop entry, emit one removal log event                    |
//! | `frequency_of`   | 1-based frequency for display; 0 for absent keys          |
//! | `clear`          | drop everything; statistics and log untouched             |
//! | `stats_report`   | render the statistics line and write it to the log        |
//!
//! Eviction runs inside the triggering `put`: starting at the
//! lowest-frequency cursor it removes entries oldest-first, crossing into
//! higher buckets as needed, until `ceil(capacity * eviction_factor)`
//! entries are gone. Capacity is therefore never exceeded, and a small
//! factor evicts the bare minimum while a large one clears most of the
//! cache in one pass.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(3, 0.1);
//! cache.put(1, "one");
//! cache.get(&1);
//! cache.get(&1);
//! cache.put(2, "two");
//! cache.put(3, "three");
//! cache.put(4, "four"); // full: evicts key 2, the oldest least-used entry
//!
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.frequency_of(&1), 3);
//! assert_eq!(cache.len(), 3);
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is single-threaded; every operation takes `&mut self`.
//! [`ConcurrentLfuCache`] wraps it in one `parking_lot::Mutex` — `get`
//! promotes, so it takes the exclusive path too, and eviction executes in
//! the same critical section as the put that triggered it. Callers never
//! observe a transient state above capacity.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::ds::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError};
use crate::listener::{CacheListener, NoopListener};
use crate::metrics::{LfuStats, LfuStatsSnapshot};
use crate::traits::{CoreCache, MutableCache};

/// Upper bound on configurable capacity.
pub const MAX_CAPACITY: usize = 100_000;

/// LFU cache core. See the module documentation for the full picture.
pub struct LfuCache<K, V> {
    buckets: FrequencyBuckets<K, V>,
    capacity: usize,
    eviction_factor: f64,
    eviction_target: usize,
    stats: LfuStats,
    listener: Arc<dyn CacheListener>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    /// Creates a cache, panicking on invalid parameters.
    ///
    /// See [`try_new`](Self::try_new) for the validation rules.
    pub fn new(capacity: usize, eviction_factor: f64) -> Self {
        match Self::try_new(capacity, eviction_factor) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid parameters.
    ///
    /// `capacity` must lie in `1..=100_000` and `eviction_factor` strictly
    /// between 0 and 1. The eviction target — the number of entries removed
    /// per eviction pass, `ceil(capacity * eviction_factor)` — is computed
    /// here and must come out at least 1. On any violation the cache is not
    /// constructed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the offending parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u64, String>::try_new(100, 0.25).is_ok());
    /// assert!(LfuCache::<u64, String>::try_new(0, 0.25).is_err());
    /// assert!(LfuCache::<u64, String>::try_new(100_001, 0.25).is_err());
    /// assert!(LfuCache::<u64, String>::try_new(100, 0.0).is_err());
    /// assert!(LfuCache::<u64, String>::try_new(100, 1.0).is_err());
    /// ```
    pub fn try_new(capacity: usize, eviction_factor: f64) -> Result<Self, ConfigError> {
        Self::try_with_listener(capacity, eviction_factor, Arc::new(NoopListener))
    }

    /// Creates a cache that reports removal and statistics events to
    /// `listener`.
    ///
    /// # Errors
    ///
    /// Same validation as [`try_new`](Self::try_new).
    pub fn try_with_listener(
        capacity: usize,
        eviction_factor: f64,
        listener: Arc<dyn CacheListener>,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(ConfigError::new(format!(
                "cache capacity must be in 1..={MAX_CAPACITY}, got {capacity}"
            )));
        }
        if !eviction_factor.is_finite() || eviction_factor <= 0.0 || eviction_factor >= 1.0 {
            return Err(ConfigError::new(format!(
                "eviction factor must lie strictly between 0 and 1, got {eviction_factor}"
            )));
        }
        let eviction_target = (capacity as f64 * eviction_factor).ceil() as usize;
        if eviction_target == 0 {
            return Err(ConfigError::new(format!(
                "eviction factor {eviction_factor} with capacity {capacity} yields an empty eviction pass"
            )));
        }

        Ok(Self {
            buckets: FrequencyBuckets::with_bucket_count(capacity),
            capacity,
            eviction_factor,
            eviction_target,
            stats: LfuStats::default(),
            listener,
        })
    }

    /// Stores a value, returning the previous value for the key if any.
    ///
    /// An existing key is updated in place: its frequency and bucket
    /// position are untouched and no event is logged. A new key triggers an
    /// eviction pass first if the cache is full, then lands in bucket 0;
    /// the insertion latency feeds the running put-latency average.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10, 0.5);
    /// assert_eq!(cache.put(1, "a"), None);
    /// assert_eq!(cache.put(1, "b"), Some("a"));
    /// assert_eq!(cache.frequency_of(&1), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let begin = Instant::now();

        if self.buckets.contains(&key) {
            self.stats.record_insert_update();
            return self.buckets.replace(&key, value);
        }

        if self.buckets.len() == self.capacity {
            self.evict();
        }
        self.buckets.insert(key, value);
        self.stats.record_insert_new();
        self.stats
            .record_put_latency(begin.elapsed().as_nanos() as u64);
        None
    }

    /// Fetches a value, promoting the entry one frequency bucket up
    /// (recency refresh once the frequency cap is reached).
    ///
    /// Misses mutate nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.buckets.contains(key) {
            self.stats.record_get_hit();
            self.buckets.touch(key)
        } else {
            self.stats.record_get_miss();
            None
        }
    }

    /// Removes a key, emitting one removal log event if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (value, _) = self.buckets.remove(key)?;
        self.log_removal(key, &value);
        Some(value)
    }

    /// Returns the 1-based display frequency for `key`, or 0 when absent.
    ///
    /// The off-by-one relative to the internal 0-based count is the
    /// externally visible convention: a just-inserted, never-read entry
    /// reports 1.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10, 0.5);
    /// assert_eq!(cache.frequency_of(&1), 0);
    /// cache.put(1, "one");
    /// assert_eq!(cache.frequency_of(&1), 1);
    /// cache.get(&1);
    /// assert_eq!(cache.frequency_of(&1), 2);
    /// ```
    pub fn frequency_of(&self, key: &K) -> usize {
        self.buckets.frequency(key).map(|f| f + 1).unwrap_or(0)
    }

    /// Returns `true` if `key` is present, without touching its frequency.
    pub fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the configured eviction factor.
    pub fn eviction_factor(&self) -> f64 {
        self.eviction_factor
    }

    /// Drops every entry and resets the frequency structure. Statistics are
    /// preserved and no events are logged.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Captures the current statistics together with size gauges.
    pub fn stats_snapshot(&self) -> LfuStatsSnapshot {
        LfuStatsSnapshot {
            get_hits: self.stats.get_hits,
            get_misses: self.stats.get_misses,
            insert_new: self.stats.insert_new,
            insert_updates: self.stats.insert_updates,
            evict_calls: self.stats.evict_calls,
            evicted_entries: self.stats.evicted_entries,
            avg_put_latency_nanos: self.stats.avg_put_latency_nanos,
            cache_len: self.buckets.len(),
            capacity: self.capacity,
        }
    }

    /// Renders the statistics line, writes it to the log, and returns it.
    pub fn stats_report(&self) -> String {
        let report = self.stats_snapshot().to_string();
        self.listener.write_log(&report);
        report
    }

    /// Removes `eviction_target` entries, lowest frequency first and
    /// oldest-first within a frequency, logging each removal.
    ///
    /// Runs only when the cache is exactly full, so the target — at most
    /// `capacity` — is always reachable; the empty-cache check merely ends
    /// the pass once everything is gone. A cursor bucket with no entries
    /// while the cache is non-empty means the structure is corrupt, which
    /// is a defect, not an operational condition.
    fn evict(&mut self) {
        self.stats.record_evict_call();
        let mut evicted = 0usize;
        while evicted < self.eviction_target {
            if self.buckets.is_empty() {
                break;
            }
            let Some((key, value)) = self.buckets.pop_lowest() else {
                let err = InvariantError::new(format!(
                    "lowest-frequency bucket {} is empty with {} entries cached",
                    self.buckets.lowest_frequency(),
                    self.buckets.len()
                ));
                panic!("{}", err);
            };
            self.log_removal(&key, &value);
            self.stats.record_evicted_entry();
            evicted += 1;
        }
    }

    fn log_removal(&self, key: &K, value: &V) {
        self.listener
            .write_log(&format!("removed entry: key={key:?}, value={value:?}"));
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.buckets.len() <= self.capacity);
        self.buckets.debug_validate_invariants();
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("eviction_factor", &self.eviction_factor)
            .field("len", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

/// Thread-safe LFU cache: one mutex around an [`LfuCache`].
///
/// Every operation serializes through the same lock. That includes `get`,
/// which promotes the entry and so mutates bucket membership, and it
/// includes eviction, which runs inside the critical section of the `put`
/// that triggered it. Values are returned by clone so the lock is released
/// before callers touch them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use lfukit::policy::lfu::ConcurrentLfuCache;
///
/// let cache = Arc::new(ConcurrentLfuCache::new(64, 0.25));
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             for i in 0..16 {
///                 cache.put((t, i), i);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(cache.len(), 64);
/// ```
pub struct ConcurrentLfuCache<K, V> {
    inner: Mutex<LfuCache<K, V>>,
}

impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    /// Creates a cache, panicking on invalid parameters.
    pub fn new(capacity: usize, eviction_factor: f64) -> Self {
        match Self::try_new(capacity, eviction_factor) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid parameters.
    /// Validation rules are those of [`LfuCache::try_new`].
    pub fn try_new(capacity: usize, eviction_factor: f64) -> Result<Self, ConfigError> {
        LfuCache::try_new(capacity, eviction_factor).map(|cache| Self {
            inner: Mutex::new(cache),
        })
    }

    /// Creates a cache reporting events to `listener`.
    pub fn try_with_listener(
        capacity: usize,
        eviction_factor: f64,
        listener: Arc<dyn CacheListener>,
    ) -> Result<Self, ConfigError> {
        LfuCache::try_with_listener(capacity, eviction_factor, listener).map(|cache| Self {
            inner: Mutex::new(cache),
        })
    }

    /// Stores a value, returning the previous value for the key if any.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Fetches a clone of the value, promoting the entry's frequency.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value under the lock, promoting the entry's
    /// frequency. Avoids the clone when only a projection is needed.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Removes a key, emitting one removal log event if it was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Returns the 1-based display frequency for `key`, or 0 when absent.
    pub fn frequency_of(&self, key: &K) -> usize {
        self.inner.lock().frequency_of(key)
    }

    /// Returns `true` if `key` is present, without touching its frequency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Drops every entry. Statistics are preserved.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Captures the current statistics together with size gauges.
    pub fn stats_snapshot(&self) -> LfuStatsSnapshot {
        self.inner.lock().stats_snapshot()
    }

    /// Renders the statistics line, writes it to the log, and returns it.
    pub fn stats_report(&self) -> String {
        self.inner.lock().stats_report()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.inner.lock().debug_validate_invariants()
    }
}

impl<K, V> fmt::Debug for ConcurrentLfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLfuCache").finish_non_exhaustive()
    }
}
