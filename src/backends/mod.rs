//! Cache Backend Implementations
//!
//! This module contains the built-in [`CacheBackend`](crate::traits::CacheBackend)
//! adapters.
//!
//! # Available Backends
//!
//! ## In-Process
//! - **Moka** - Concurrent cache with automatic eviction (default backend, feature: `moka`)
//! - **`DashMap`** - Simple concurrent `HashMap`-based cache (always available)
//!
//! ## Networked
//! - **Redis** - Distributed cache with persistence (feature: `redis`)
//! - **Memcached** - Lightweight distributed cache (feature: `memcached`)
//!
//! # Usage
//!
//! ```rust,no_run
//! use scoped_cache::backends::DashMapCache;
//!
//! // Explicit backend construction; hand the result to the builder
//! // via `ScopedCacheBuilder::with_backend`.
//! let map = DashMapCache::new();
//! ```

pub mod dashmap_cache;

#[cfg(feature = "moka")]
pub mod moka_cache;

#[cfg(feature = "redis")]
pub mod redis_cache;

#[cfg(feature = "memcached")]
pub mod memcached_cache;

pub use dashmap_cache::DashMapCache;

#[cfg(feature = "moka")]
pub use moka_cache::{MokaCache, MokaCacheConfig};

#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;

#[cfg(feature = "memcached")]
pub use memcached_cache::MemcachedCache;
