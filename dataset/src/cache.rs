//! Load cache for decoded resources.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cache entry for a decoded resource.
#[derive(Debug)]
struct CacheEntry<T> {
    /// The decoded value.
    value: Arc<T>,

    /// Insertion sequence, used for oldest-first eviction.
    inserted: u64,
}

/// Bounded cache of decoded resources keyed by resource path, so switching
/// back to a previous configuration does not refetch.
#[derive(Debug)]
pub struct LoadCache<T> {
    /// In-memory cache.
    entries: RwLock<HashMap<String, CacheEntry<T>>>,

    /// Maximum cache size; zero disables caching.
    max_entries: usize,

    sequence: AtomicU64,
}

impl<T> LoadCache<T> {
    /// Create a new cache.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            sequence: AtomicU64::new(0),
        }
    }

    /// Get a cached value.
    pub async fn get(&self, path: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        entries.get(path).map(|e| Arc::clone(&e.value))
    }

    /// Put a value in the cache, evicting the oldest entry at capacity.
    pub async fn put(&self, path: &str, value: Arc<T>) {
        if self.max_entries == 0 {
            return;
        }

        let mut entries = self.entries.write().await;

        if entries.len() >= self.max_entries && !entries.contains_key(path) {
            if let Some(oldest_key) = entries
                .iter()
                .min_by_key(|(_, v)| v.inserted)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest_key);
                debug!("Evicted cached resource: {oldest_key}");
            }
        }

        let inserted = self.sequence.fetch_add(1, Ordering::Relaxed);
        entries.insert(path.to_string(), CacheEntry { value, inserted });
        debug!("Cached resource: {path}");
    }

    /// Check if a path is cached.
    pub async fn contains(&self, path: &str) -> bool {
        self.entries.read().await.contains_key(path)
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Clear the entire cache.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        info!("Cleared load cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_cache_put_get() {
        let cache = LoadCache::new(4);
        cache.put("a", Arc::new(1)).await;

        assert_eq!(cache.get("a").await.as_deref(), Some(&1));
        assert!(cache.get("b").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_evicts_oldest() {
        let cache = LoadCache::new(2);
        cache.put("a", Arc::new(1)).await;
        cache.put("b", Arc::new(2)).await;
        cache.put("c", Arc::new(3)).await;

        assert_eq!(cache.len().await, 2);
        assert!(!cache.contains("a").await);
        assert!(cache.contains("c").await);
    }

    #[tokio::test]
    async fn test_zero_capacity_disables_cache() {
        let cache = LoadCache::new(0);
        cache.put("a", Arc::new(1)).await;
        assert!(cache.get("a").await.is_none());
    }
}
