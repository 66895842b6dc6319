//! Moka Cache - In-Memory Cache Backend
//!
//! High-performance in-process cache using Moka. This is the default backend.

use anyhow::Result;
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cache entry with TTL information
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Configuration for `MokaCache`
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Max capacity of the cache
    pub max_capacity: u64,
    /// Upper bound on entry lifetime, independent of per-key TTL
    pub time_to_live: Duration,
    /// Time to idle for cache entries
    pub time_to_idle: Duration,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 2000,
            time_to_live: Duration::from_secs(3600),
            time_to_idle: Duration::from_secs(120),
        }
    }
}

/// Moka in-memory cache with per-key TTL support
///
/// The default backend, providing:
/// - Fast in-process access (< 1ms latency)
/// - Automatic eviction via LRU
/// - Per-key TTL support
/// - Statistics tracking
pub struct MokaCache {
    /// Moka cache instance
    cache: Cache<String, CacheEntry>,
    /// Hit counter
    hits: Arc<AtomicU64>,
    /// Miss counter
    misses: Arc<AtomicU64>,
    /// Set counter
    sets: Arc<AtomicU64>,
}

impl MokaCache {
    /// Create new Moka cache
    #[must_use]
    pub fn new(config: MokaCacheConfig) -> Self {
        info!("Initializing Moka Cache");

        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.time_to_live)
            .time_to_idle(config.time_to_idle)
            .build();

        info!(
            capacity = config.max_capacity,
            "Moka Cache initialized with per-key TTL support"
        );

        Self {
            cache,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            sets: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new(MokaCacheConfig::default())
    }
}

// ===== Trait Implementations =====

use crate::traits::CacheBackend;
use async_trait::async_trait;

/// Implement `CacheBackend` trait for `MokaCache`
#[async_trait]
impl CacheBackend for MokaCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(entry) = self.cache.get(key).await {
            if entry.is_expired() {
                // Remove expired entry
                self.cache.remove(key).await;
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            } else {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value)
            }
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(value.to_vec(), ttl);
        self.cache.insert(key.to_string(), entry).await;
        self.sets.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, ttl_secs = %ttl.as_secs(), "[Moka] Cached key with TTL");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn contains(&self, key: &str) -> bool {
        match self.cache.get(key).await {
            Some(entry) if !entry.is_expired() => true,
            Some(_) => {
                self.cache.remove(key).await;
                false
            }
            None => false,
        }
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        debug!("[Moka] Invalidated all entries");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let test_key = "health_check_moka";
        let test_value = b"health_check_value";

        match self
            .set_with_ttl(test_key, test_value, Duration::from_secs(60))
            .await
        {
            Ok(()) => match self.get(test_key).await {
                Some(retrieved) => {
                    let _ = self.remove(test_key).await;
                    retrieved == test_value
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    fn name(&self) -> &'static str {
        "Moka"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn per_key_ttl_expires_entry() {
        let cache = MokaCache::default();
        cache
            .set_with_ttl("k", b"v", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn round_trip_within_ttl() {
        let cache = MokaCache::default();
        cache
            .set_with_ttl("k", b"v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.as_deref(), Some(b"v".as_slice()));
        assert!(cache.contains("k").await);
    }
}
