//! Generic async cache with TTL support.
//!
//! Backs the directory's org-scoped read-through reads. The cache is
//! advisory: a stale or missing entry only means the store gets queried
//! again, so concurrent fills are tolerated without locking.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A cache entry with an expiration time.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn with_expiration(value: V, ttl_seconds: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Cache tuning options.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Background cleanup interval in seconds (default: 60)
    pub cleanup_interval_seconds: u64,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            cleanup_interval_seconds: 60,
        }
    }
}

/// Local backend implementation using DashMap.
#[derive(Debug)]
pub struct LocalBackend<V> {
    storage: Arc<DashMap<String, CacheEntry<V>>>,
    cleanup_task: Option<JoinHandle<()>>,
    options: CacheOptions,
}

impl<V> LocalBackend<V>
where
    V: Send + Sync + Clone + 'static,
{
    fn new(options: CacheOptions) -> Self {
        let storage = Arc::new(DashMap::new());
        let cleanup_task = Some(Self::spawn_cleanup_task(
            Arc::clone(&storage),
            options.cleanup_interval_seconds,
        ));

        Self {
            storage,
            cleanup_task,
            options,
        }
    }

    /// Spawn a background task to clean up expired entries.
    fn spawn_cleanup_task(
        storage: Arc<DashMap<String, CacheEntry<V>>>,
        interval_seconds: u64,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_seconds));
            loop {
                interval.tick().await;
                let now = Utc::now();
                storage.retain(|_, entry| entry.expires_at > now);
            }
        })
    }

    async fn exists(&self, key: &str) -> bool {
        self.storage
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    async fn get(&self, key: &str) -> Option<V> {
        if let Some(entry) = self.storage.get(key) {
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        None
    }

    async fn set_ex(&self, key: &str, value: V, ttl_seconds: u64) {
        let entry = CacheEntry::with_expiration(value, ttl_seconds as i64);
        self.storage.insert(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) -> bool {
        self.storage.remove(key).is_some()
    }

    async fn clear(&self) -> usize {
        let count = self.storage.len();
        self.storage.clear();
        count
    }
}

impl<V> Drop for LocalBackend<V> {
    fn drop(&mut self) {
        // Abort the cleanup task when the backend is dropped
        if let Some(task) = self.cleanup_task.take() {
            task.abort();
        }
    }
}

/// Generic cache enum with extensible backend variants.
///
/// Currently only supports the in-process `LocalCache` variant; the enum
/// keeps room for an external backend without touching call sites.
#[derive(Debug)]
pub enum Cache<V>
where
    V: Send + Sync + 'static,
{
    /// Local in-memory cache using DashMap
    LocalCache(LocalBackend<V>),
}

impl<V> Cache<V>
where
    V: Send + Sync + Clone + 'static,
{
    /// Create a new local cache with the given options.
    pub fn new_local(options: CacheOptions) -> Self {
        Self::LocalCache(LocalBackend::new(options))
    }

    /// Check if a key exists and is not expired.
    pub async fn exists(&self, key: &str) -> bool {
        match self {
            Self::LocalCache(backend) => backend.exists(key).await,
        }
    }

    /// Get a value by key (None if the key is absent or expired).
    pub async fn get(&self, key: &str) -> Option<V> {
        match self {
            Self::LocalCache(backend) => backend.get(key).await,
        }
    }

    /// Set a value with expiration in seconds.
    pub async fn set_ex(&self, key: &str, value: V, ttl_seconds: u64) {
        match self {
            Self::LocalCache(backend) => backend.set_ex(key, value, ttl_seconds).await,
        }
    }

    /// Delete a key. Returns true if the key existed.
    pub async fn delete(&self, key: &str) -> bool {
        match self {
            Self::LocalCache(backend) => backend.delete(key).await,
        }
    }

    /// Clear all entries. Returns the number of entries removed.
    pub async fn clear(&self) -> usize {
        match self {
            Self::LocalCache(backend) => backend.clear().await,
        }
    }
}

// Implement Clone for Cache (shallow clone via Arc)
impl<V> Clone for Cache<V>
where
    V: Send + Sync + Clone + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Self::LocalCache(backend) => {
                // Share the same storage without spawning a second cleanup
                // task; the original backend's task covers all clones.
                let storage = Arc::clone(&backend.storage);
                let options = backend.options.clone();

                Self::LocalCache(LocalBackend {
                    storage,
                    cleanup_task: None,
                    options,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_set_get() {
        let cache: Cache<String> = Cache::new_local(CacheOptions::default());

        cache.set_ex("key1", "value1".to_string(), 60).await;
        let value = cache.get("key1").await;

        assert_eq!(value, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache: Cache<String> = Cache::new_local(CacheOptions::default());

        cache.set_ex("key1", "value1".to_string(), 60).await;
        assert!(cache.delete("key1").await);
        assert!(!cache.delete("key1").await);

        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let cache: Cache<String> = Cache::new_local(CacheOptions::default());

        cache.set_ex("key1", "value1".to_string(), 0).await;
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

        assert_eq!(cache.get("key1").await, None);
        assert!(!cache.exists("key1").await);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let cache: Cache<String> = Cache::new_local(CacheOptions::default());

        cache.set_ex("a", "1".to_string(), 60).await;
        cache.set_ex("b", "2".to_string(), 60).await;

        assert_eq!(cache.clear().await, 2);
        assert_eq!(cache.get("a").await, None);
    }

    #[tokio::test]
    async fn test_clone_shares_storage() {
        let cache: Cache<String> = Cache::new_local(CacheOptions::default());
        let clone = cache.clone();

        cache.set_ex("shared", "yes".to_string(), 60).await;
        assert_eq!(clone.get("shared").await, Some("yes".to_string()));
    }
}
