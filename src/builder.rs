//! Facade Builder - Explicit Backend Selection
//!
//! Constructs a [`ScopedCache`] from an explicit backend choice. The original
//! pattern this crate replaces probed the runtime for whichever store
//! happened to be loaded; here the caller names the backend (or passes a
//! custom one), so behavior never depends on hidden environment state.
//!
//! # Example: Named Backend
//!
//! ```rust,no_run
//! use scoped_cache::{BackendKind, ScopedCache};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = ScopedCache::builder()
//!         .backend(BackendKind::Moka)
//!         .build()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Example: Custom Backend
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scoped_cache::ScopedCache;
//!
//! let cache = ScopedCache::builder()
//!     .with_backend(Arc::new(MyStore::new()))
//!     .build()
//!     .await?;
//! ```

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::codecs::JsonCodec;
use crate::facade::ScopedCache;
use crate::scope::RequestScope;
use crate::traits::{CacheBackend, CacheCodec};

use crate::backends::DashMapCache;

#[cfg(feature = "moka")]
use crate::backends::{MokaCache, MokaCacheConfig};

#[cfg(feature = "redis")]
use crate::backends::RedisCache;

#[cfg(feature = "memcached")]
use crate::backends::MemcachedCache;

/// Environment variable consulted by [`ScopedCacheBuilder::backend_from_env`]
pub const BACKEND_ENV_VAR: &str = "CACHE_BACKEND";

/// Error parsing a backend name from configuration
#[derive(Debug, thiserror::Error)]
#[error("unknown cache backend {name:?} (expected one of: {expected})")]
pub struct UnknownBackend {
    name: String,
    expected: String,
}

/// Built-in backends selectable by name
///
/// Parsing is case-insensitive and only accepts backends compiled in via
/// feature flags, so a configuration file naming a disabled backend fails
/// loudly at startup instead of silently running uncached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Moka in-process cache (default feature `moka`)
    #[cfg(feature = "moka")]
    Moka,
    /// `DashMap` in-process cache (always available)
    DashMap,
    /// Redis distributed cache (feature `redis`)
    #[cfg(feature = "redis")]
    Redis,
    /// Memcached distributed cache (feature `memcached`)
    #[cfg(feature = "memcached")]
    Memcached,
}

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            #[cfg(feature = "moka")]
            "moka" => Ok(Self::Moka),
            "dashmap" => Ok(Self::DashMap),
            #[cfg(feature = "redis")]
            "redis" => Ok(Self::Redis),
            #[cfg(feature = "memcached")]
            "memcached" => Ok(Self::Memcached),
            other => Err(UnknownBackend {
                name: other.to_owned(),
                expected: enabled_backends(),
            }),
        }
    }
}

/// Names accepted by `BackendKind::from_str` under the current feature set
fn enabled_backends() -> String {
    let mut names = vec!["dashmap"];
    if cfg!(feature = "moka") {
        names.insert(0, "moka");
    }
    if cfg!(feature = "redis") {
        names.push("redis");
    }
    if cfg!(feature = "memcached") {
        names.push("memcached");
    }
    names.join(", ")
}

enum BackendChoice {
    Kind(BackendKind),
    Custom(Arc<dyn CacheBackend>),
}

/// Builder for [`ScopedCache`]
///
/// With no backend configured, `build()` still succeeds and yields a facade
/// whose operations all return their unavailable defaults. The only `Err`
/// out of `build()` is a networked backend failing to connect.
pub struct ScopedCacheBuilder<C: CacheCodec = JsonCodec> {
    backend: Option<BackendChoice>,
    scope: RequestScope,
    codec: C,
    default_ttl: Duration,
    #[cfg(feature = "redis")]
    redis_url: Option<String>,
    #[cfg(feature = "memcached")]
    memcached_url: Option<String>,
}

impl ScopedCacheBuilder<JsonCodec> {
    /// Create a builder with no backend configured
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: None,
            scope: RequestScope::detached(),
            codec: JsonCodec,
            default_ttl: Duration::from_secs(300),
            #[cfg(feature = "redis")]
            redis_url: None,
            #[cfg(feature = "memcached")]
            memcached_url: None,
        }
    }
}

impl Default for ScopedCacheBuilder<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CacheCodec> ScopedCacheBuilder<C> {
    /// Select a built-in backend by kind
    #[must_use]
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.backend = Some(BackendChoice::Kind(kind));
        self
    }

    /// Use a custom backend implementation
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn CacheBackend>) -> Self {
        self.backend = Some(BackendChoice::Custom(backend));
        self
    }

    /// Select the backend from the `CACHE_BACKEND` environment variable
    ///
    /// An unset variable leaves the builder without a backend, which is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to an unrecognized name.
    pub fn backend_from_env(mut self) -> Result<Self, UnknownBackend> {
        if let Ok(name) = std::env::var(BACKEND_ENV_VAR) {
            self.backend = Some(BackendChoice::Kind(name.parse()?));
        }
        Ok(self)
    }

    /// Set the request scope used for key namespacing
    #[must_use]
    pub fn scope(mut self, scope: RequestScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the TTL used by [`ScopedCache::set`] (default: 300 seconds)
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Replace the serialization codec
    #[must_use]
    pub fn codec<C2: CacheCodec>(self, codec: C2) -> ScopedCacheBuilder<C2> {
        ScopedCacheBuilder {
            backend: self.backend,
            scope: self.scope,
            codec,
            default_ttl: self.default_ttl,
            #[cfg(feature = "redis")]
            redis_url: self.redis_url,
            #[cfg(feature = "memcached")]
            memcached_url: self.memcached_url,
        }
    }

    /// Redis connection string for [`BackendKind::Redis`]
    ///
    /// Falls back to the `REDIS_URL` environment variable, then
    /// `redis://127.0.0.1:6379`.
    #[cfg(feature = "redis")]
    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    /// Memcached connection string for [`BackendKind::Memcached`]
    ///
    /// Falls back to the `MEMCACHED_URL` environment variable, then
    /// `memcache://127.0.0.1:11211`.
    #[cfg(feature = "memcached")]
    #[must_use]
    pub fn memcached_url(mut self, url: impl Into<String>) -> Self {
        self.memcached_url = Some(url.into());
        self
    }

    /// Build the facade
    ///
    /// # Errors
    ///
    /// Returns an error only if a networked backend cannot be constructed
    /// (bad URL, unreachable server). A builder with no backend builds a
    /// facade whose operations return their unavailable defaults.
    pub async fn build(self) -> Result<ScopedCache<C>> {
        let backend: Option<Arc<dyn CacheBackend>> = match self.backend {
            None => {
                info!("No cache backend configured; facade will run unavailable");
                None
            }
            Some(BackendChoice::Custom(backend)) => Some(backend),
            Some(BackendChoice::Kind(kind)) => Some(match kind {
                #[cfg(feature = "moka")]
                BackendKind::Moka => Arc::new(MokaCache::new(MokaCacheConfig::default())),
                BackendKind::DashMap => Arc::new(DashMapCache::new()),
                #[cfg(feature = "redis")]
                BackendKind::Redis => match self.redis_url {
                    Some(url) => Arc::new(RedisCache::with_url(&url).await?),
                    None => Arc::new(RedisCache::new().await?),
                },
                #[cfg(feature = "memcached")]
                BackendKind::Memcached => match self.memcached_url {
                    Some(url) => Arc::new(MemcachedCache::with_url(&url)?),
                    None => Arc::new(MemcachedCache::new()?),
                },
            }),
        };

        if let Some(backend) = &backend {
            info!(backend = %backend.name(), scope = ?self.scope, "Scoped cache ready");
        }

        Ok(ScopedCache::assemble(
            backend,
            self.scope,
            self.codec,
            self.default_ttl,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("dashmap".parse::<BackendKind>().ok(), Some(BackendKind::DashMap));
        assert_eq!("DashMap".parse::<BackendKind>().ok(), Some(BackendKind::DashMap));
        #[cfg(feature = "moka")]
        assert_eq!("MOKA".parse::<BackendKind>().ok(), Some(BackendKind::Moka));
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = "xcache".parse::<BackendKind>().unwrap_err();
        assert!(err.to_string().contains("xcache"));
        assert!(err.to_string().contains("dashmap"));
    }
}
