//! Pass-through cache capability for generic callers.
//!
//! [`LfuCacheService`] hands out the narrow [`CacheService`] surface — put
//! and get, nothing else — over a shared [`ConcurrentLfuCache`]. It holds
//! the cache behind an `Arc`, so cloning the service yields another handle
//! to the same cache. The service adds no logic of its own; callers that
//! need removal, statistics, or invariant checks hold the cache directly.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::listener::CacheListener;
use crate::policy::lfu::ConcurrentLfuCache;
use crate::traits::CacheService;

/// Shared put/get handle over an LFU cache.
///
/// # Example
///
/// ```
/// use lfukit::service::LfuCacheService;
/// use lfukit::traits::CacheService;
///
/// let service = LfuCacheService::new(16, 0.25);
/// assert_eq!(service.put(1, "one"), None);
/// assert_eq!(service.get(&1), Some("one"));
/// assert_eq!(service.get(&2), None);
/// ```
pub struct LfuCacheService<K, V> {
    cache: Arc<ConcurrentLfuCache<K, V>>,
}

impl<K, V> LfuCacheService<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    /// Creates a service over a fresh cache, panicking on invalid
    /// parameters.
    pub fn new(capacity: usize, eviction_factor: f64) -> Self {
        match Self::try_new(capacity, eviction_factor) {
            Ok(service) => service,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a service over a fresh cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same rules as
    /// [`ConcurrentLfuCache::try_new`].
    pub fn try_new(capacity: usize, eviction_factor: f64) -> Result<Self, ConfigError> {
        ConcurrentLfuCache::try_new(capacity, eviction_factor).map(|cache| Self::from_cache(cache))
    }

    /// Creates a service whose cache reports events to `listener`.
    pub fn try_with_listener(
        capacity: usize,
        eviction_factor: f64,
        listener: Arc<dyn CacheListener>,
    ) -> Result<Self, ConfigError> {
        ConcurrentLfuCache::try_with_listener(capacity, eviction_factor, listener)
            .map(|cache| Self::from_cache(cache))
    }

    /// Wraps an existing cache. Useful when one cache backs both a service
    /// handle and an administrative handle.
    pub fn from_cache(cache: impl Into<Arc<ConcurrentLfuCache<K, V>>>) -> Self {
        Self {
            cache: cache.into(),
        }
    }

    /// Returns the backing cache.
    pub fn cache(&self) -> &Arc<ConcurrentLfuCache<K, V>> {
        &self.cache
    }
}

impl<K, V> Clone for LfuCacheService<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<K, V> fmt::Debug for LfuCacheService<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheService").finish_non_exhaustive()
    }
}

impl<K, V> CacheService<K, V> for LfuCacheService<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn put(&self, key: K, value: V) -> Option<V> {
        self.cache.put(key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key)
    }
}
