//! Memcached Cache - Distributed Cache Backend
//!
//! Memcached-based backend with simple key-value operations.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Memcached distributed cache
///
/// An alternative networked backend, providing:
/// - Caching shared across multiple application instances
/// - Simple key-value storage (no persistence)
/// - LRU eviction policy
/// - High throughput for read-heavy workloads
///
/// **Note**: The `memcache` client is synchronous; calls run inline on the
/// async executor. Memcached latencies are typically well under a
/// millisecond on a local network, which keeps this acceptable.
pub struct MemcachedCache {
    /// Memcached client
    client: memcache::Client,
    /// Hit counter
    hits: Arc<AtomicU64>,
    /// Miss counter
    misses: Arc<AtomicU64>,
    /// Set counter
    sets: Arc<AtomicU64>,
}

impl MemcachedCache {
    /// Create new Memcached cache
    ///
    /// Uses the `MEMCACHED_URL` environment variable, defaulting to
    /// `memcache://127.0.0.1:11211`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Memcached client cannot be created.
    pub fn new() -> Result<Self> {
        let memcached_url = std::env::var("MEMCACHED_URL")
            .unwrap_or_else(|_| "memcache://127.0.0.1:11211".to_string());
        Self::with_url(&memcached_url)
    }

    /// Create new Memcached cache with custom URL
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created or the connection
    /// test fails.
    pub fn with_url(memcached_url: &str) -> Result<Self> {
        info!(url = %memcached_url, "Initializing Memcached Cache");

        let client = memcache::connect(memcached_url)
            .map_err(|e| anyhow!("Failed to connect to Memcached: {e}"))?;

        // Test connection with version command
        match client.version() {
            Ok(versions) => {
                info!(
                    url = %memcached_url,
                    server_count = versions.len(),
                    "Memcached Cache connected successfully"
                );
            }
            Err(e) => {
                return Err(anyhow!("Memcached connection test failed: {e}"));
            }
        }

        Ok(Self {
            client,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            sets: Arc::new(AtomicU64::new(0)),
        })
    }
}

// ===== Trait Implementations =====

use crate::traits::CacheBackend;
use async_trait::async_trait;

/// Implement `CacheBackend` trait for `MemcachedCache`
#[async_trait]
impl CacheBackend for MemcachedCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.client.get::<Vec<u8>>(key) {
            Ok(Some(value)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Ok(None) | Err(_) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let ttl_secs = u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX);

        self.client
            .set(key, value, ttl_secs)
            .map_err(|e| anyhow!("Memcached SET failed: {e}"))?;

        self.sets.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, ttl_secs = %ttl_secs, "[Memcached] Cached key with TTL");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.client
            .delete(key)
            .map_err(|e| anyhow!("Memcached DELETE failed: {e}"))?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> bool {
        matches!(self.client.get::<Vec<u8>>(key), Ok(Some(_)))
    }

    async fn clear(&self) -> Result<()> {
        self.client
            .flush()
            .map_err(|e| anyhow!("Memcached FLUSH failed: {e}"))?;
        debug!("[Memcached] Flushed all entries");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let test_key = "health_check_memcached";
        let test_value = b"health_check_value";

        match self
            .set_with_ttl(test_key, test_value, Duration::from_secs(10))
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
        "Memcached"
    }
}
