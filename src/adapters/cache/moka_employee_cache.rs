//! `EmployeeCache` backed by a moka future cache.

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::domain::models::CacheConfig;
use crate::domain::ports::{CacheKey, CachedEntry, EmployeeCache};

/// Process-wide employee cache.
///
/// Unbounded and without expiry by default; `CacheConfig` can opt into a
/// capacity bound or a TTL.
#[derive(Clone)]
pub struct MokaEmployeeCache {
    entries: Cache<CacheKey, CachedEntry>,
}

impl MokaEmployeeCache {
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let mut builder = Cache::<CacheKey, CachedEntry>::builder();
        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = config.time_to_live_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Number of live entries, after flushing moka's pending maintenance.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

impl Default for MokaEmployeeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeCache for MokaEmployeeCache {
    async fn lookup(&self, key: &CacheKey) -> Option<CachedEntry> {
        self.entries.get(key).await
    }

    async fn store(&self, key: CacheKey, entry: CachedEntry) {
        self.entries.insert(key, entry).await;
    }

    async fn evict(&self, key: &CacheKey) {
        self.entries.invalidate(key).await;
    }

    async fn evict_all(&self) {
        self.entries.invalidate_all();
    }
}
