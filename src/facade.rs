//! Scoped Cache Facade - Operation Dispatch
//!
//! Applies key namespacing, then forwards each operation to the configured
//! backend in a single pass. No retries, no queues, no error translation:
//! a backend failure surfaces as the operation's `false`/`None` result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::builder::ScopedCacheBuilder;
use crate::codecs::JsonCodec;
use crate::scope::RequestScope;
use crate::traits::{CacheBackend, CacheCodec};

/// TTL presets for different data types
#[derive(Debug, Clone)]
pub enum CacheStrategy {
    /// Real-time data - 10 seconds TTL
    RealTime,
    /// Short-term data - 5 minutes TTL
    ShortTerm,
    /// Medium-term data - 1 hour TTL
    MediumTerm,
    /// Long-term data - 3 hours TTL
    LongTerm,
    /// Custom TTL
    Custom(Duration),
    /// Default strategy (5 minutes)
    Default,
}

impl CacheStrategy {
    /// Convert strategy to duration
    #[must_use]
    pub fn to_duration(&self) -> Duration {
        match self {
            Self::RealTime => Duration::from_secs(10),
            Self::ShortTerm | Self::Default => Duration::from_secs(300), // 5 minutes
            Self::MediumTerm => Duration::from_secs(3600),               // 1 hour
            Self::LongTerm => Duration::from_secs(10800),                // 3 hours
            Self::Custom(duration) => *duration,
        }
    }
}

/// Snapshot of facade statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub removals: u64,
    /// Hit rate in percent over all `get` requests
    pub hit_rate: f64,
}

/// Request-scoped caching facade
///
/// The main entry point of the crate. Every operation takes a *logical name*,
/// derives the namespaced key via [`RequestScope::key`], and forwards a
/// single call to the configured [`CacheBackend`].
///
/// A facade without a backend is a normal, fully usable object: every
/// operation returns its unavailable default (`false` or `None`) and never
/// panics or errors.
///
/// # Example
///
/// ```rust,no_run
/// use scoped_cache::{BackendKind, RequestScope, ScopedCache};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let cache = ScopedCache::builder()
///         .backend(BackendKind::Moka)
///         .scope(RequestScope::new(Some("example.com"), Some("/app/public/index.php")))
///         .build()
///         .await?;
///
///     cache.set("settings", &serde_json::json!({"theme": "dark"})).await;
///     let settings: Option<serde_json::Value> = cache.get("settings").await;
///     tracing::info!(?settings, "cached settings");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ScopedCache<C: CacheCodec = JsonCodec> {
    backend: Option<Arc<dyn CacheBackend>>,
    scope: RequestScope,
    codec: Arc<C>,
    default_ttl: Duration,
    /// Statistics
    requests: Arc<AtomicU64>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    sets: Arc<AtomicU64>,
    removals: Arc<AtomicU64>,
}

impl ScopedCache<JsonCodec> {
    /// Start building a facade
    #[must_use]
    pub fn builder() -> ScopedCacheBuilder<JsonCodec> {
        ScopedCacheBuilder::new()
    }

    /// A facade with no backend
    ///
    /// Every operation returns its unavailable default. Useful as a drop-in
    /// no-op cache and in tests.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::assemble(None, RequestScope::detached(), JsonCodec, Duration::from_secs(300))
    }
}

impl<C: CacheCodec> ScopedCache<C> {
    pub(crate) fn assemble(
        backend: Option<Arc<dyn CacheBackend>>,
        scope: RequestScope,
        codec: C,
        default_ttl: Duration,
    ) -> Self {
        Self {
            backend,
            scope,
            codec: Arc::new(codec),
            default_ttl,
            requests: Arc::new(AtomicU64::new(0)),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            sets: Arc::new(AtomicU64::new(0)),
            removals: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether a backend is configured
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the configured backend, if any
    #[must_use]
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_deref().map(|backend| backend.name())
    }

    /// The scope used for key namespacing
    #[must_use]
    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Check whether a logical name is present in the cache
    ///
    /// Returns `false` when no backend is configured or the key is absent.
    pub async fn exists(&self, name: &str) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };
        backend.contains(&self.scope.key(name)).await
    }

    /// Get a value by logical name
    ///
    /// Returns `None` when no backend is configured, the key is missing or
    /// expired, or the stored bytes cannot be decoded as `T` (logged at
    /// warn and counted as a miss).
    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let Some(backend) = &self.backend else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        let key = self.scope.key(name);
        match backend.get(&key).await {
            Some(bytes) => match self.codec.deserialize(&bytes) {
                Ok(value) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    Some(value)
                }
                Err(e) => {
                    warn!(key = %key, codec = %self.codec.name(), error = %e, "Cached bytes failed to decode");
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    None
                }
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value under a logical name with the default TTL (300 seconds)
    ///
    /// Returns whether the backend accepted the write.
    pub async fn set<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> bool {
        self.set_with_ttl(name, value, self.default_ttl).await
    }

    /// Store a value with an explicit TTL
    ///
    /// Returns whether the backend accepted the write. Serialization or
    /// backend failures are logged and reported as `false`.
    pub async fn set_with_ttl<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        ttl: Duration,
    ) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        let key = self.scope.key(name);
        let bytes = match self.codec.serialize(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %key, codec = %self.codec.name(), error = %e, "Value failed to serialize");
                return false;
            }
        };

        match backend.set_with_ttl(&key, &bytes, ttl).await {
            Ok(()) => {
                self.sets.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, backend = %backend.name(), ttl_secs = %ttl.as_secs(), "Cached value");
                true
            }
            Err(e) => {
                warn!(key = %key, backend = %backend.name(), error = %e, "Backend rejected write");
                false
            }
        }
    }

    /// Store a value using a TTL preset
    pub async fn set_with_strategy<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        strategy: CacheStrategy,
    ) -> bool {
        self.set_with_ttl(name, value, strategy.to_duration()).await
    }

    /// Remove a logical name from the cache
    ///
    /// Returns whether the backend processed the removal. Removing an absent
    /// key is still a successful removal.
    pub async fn delete(&self, name: &str) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        let key = self.scope.key(name);
        match backend.remove(&key).await {
            Ok(()) => {
                self.removals.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, backend = %backend.name(), "Removed key");
                true
            }
            Err(e) => {
                warn!(key = %key, backend = %backend.name(), error = %e, "Backend rejected removal");
                false
            }
        }
    }

    /// Flush every entry the backend holds
    ///
    /// This clears the *whole* backend, not just this scope's namespace;
    /// for a shared Redis/Memcached instance that includes other
    /// applications' entries. Returns `false` when no backend is configured
    /// or the flush fails.
    pub async fn clear_all(&self) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        match backend.clear().await {
            Ok(()) => {
                debug!(backend = %backend.name(), "Cleared backend");
                true
            }
            Err(e) => {
                warn!(backend = %backend.name(), error = %e, "Backend rejected clear");
                false
            }
        }
    }

    /// Probe the backend with a write/read round-trip
    ///
    /// Returns `false` when no backend is configured.
    pub async fn health_check(&self) -> bool {
        match &self.backend {
            Some(backend) => backend.health_check().await,
            None => false,
        }
    }

    /// Current statistics snapshot
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let requests = self.requests.load(Ordering::Relaxed);
        let hits = self.hits.load(Ordering::Relaxed);

        #[allow(clippy::cast_precision_loss)]
        let hit_rate = if requests > 0 {
            (hits as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            requests,
            hits,
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            hit_rate,
        }
    }
}
