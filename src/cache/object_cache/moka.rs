use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaObjectCache);

/// 缓存值及其单独的过期时间
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _now: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaObjectCache {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_capacity(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_capacity(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .support_invalidation_closures()
            .build();

        debug!(
            "MokaObjectCache initialized with max capacity: {}, default TTL: {}s",
            max_capacity, default_ttl
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn remove_by_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            warn!("Failed to invalidate cache entries by prefix: {}", e);
        }
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaObjectCache::with_capacity(100, 60);
        cache.insert_raw("session:1:a".into(), "v".into(), 0).await;
        assert_eq!(
            cache.get_raw("session:1:a").await,
            CacheResult::Found("v".to_string())
        );

        cache.remove("session:1:a").await;
        assert_eq!(cache.get_raw("session:1:a").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_remove_by_prefix_keeps_other_accounts() {
        let cache = MokaObjectCache::with_capacity(100, 60);
        cache.insert_raw("session:1:a".into(), "a".into(), 0).await;
        cache.insert_raw("session:1:b".into(), "b".into(), 0).await;
        cache.insert_raw("session:12:c".into(), "c".into(), 0).await;

        cache.remove_by_prefix("session:1:").await;
        cache.inner.run_pending_tasks().await;

        assert_eq!(cache.get_raw("session:1:a").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("session:1:b").await, CacheResult::NotFound);
        assert_eq!(
            cache.get_raw("session:12:c").await,
            CacheResult::Found("c".to_string())
        );
    }
}
