//! Scoped Cache
//!
//! A thin, request-scoped caching facade for Rust featuring:
//! - **Pluggable Backends**: Moka (in-process, default), `DashMap`, Redis, Memcached
//! - **Explicit Selection**: backends are named in configuration, never probed
//!   from the environment
//! - **Key Namespacing**: cache keys are prefixed with the request host and
//!   script base path, so applications sharing one store never collide
//! - **Graceful Absence**: a facade with no backend answers every operation
//!   with its safe default instead of erroring
//!
//! The facade implements no storage, eviction, or concurrency logic of its
//! own; every operation is a single pass-through call to the selected
//! backend.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scoped_cache::{BackendKind, RequestScope, ScopedCache};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = ScopedCache::builder()
//!         .backend(BackendKind::Moka)
//!         .scope(RequestScope::new(Some("example.com"), Some("/app/public/index.php")))
//!         .build()
//!         .await?;
//!
//!     // Keys are namespaced per (host, base path) automatically:
//!     // "settings" is stored as "example_com_app_public_settings"
//!     cache.set("settings", &serde_json::json!({"theme": "dark"})).await;
//!
//!     if let Some(settings) = cache.get::<serde_json::Value>("settings").await {
//!         tracing::info!(%settings, "cache hit");
//!     }
//!
//!     cache.delete("settings").await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! exists/get/set/delete/clear_all
//!         │
//!         ▼
//! RequestScope::key (host_basepath_name)
//!         │
//!         ▼
//! Option<Arc<dyn CacheBackend>> ── None ⇒ false / None
//!         │
//!         ▼
//! Moka │ DashMap │ Redis │ Memcached │ custom
//! ```
//!
//! # Operation Contracts
//!
//! Every operation degrades to `false`/`None` when no backend is configured
//! and propagates backend rejections as the same defaults. The only `Result`
//! in the public API is [`ScopedCacheBuilder::build`], which can fail when a
//! networked backend cannot connect.

pub mod backends;
pub mod builder;
pub mod codecs;
pub mod facade;
pub mod scope;
pub mod traits;

pub use backends::DashMapCache;

#[cfg(feature = "moka")]
pub use backends::{MokaCache, MokaCacheConfig};

#[cfg(feature = "redis")]
pub use backends::RedisCache;

#[cfg(feature = "memcached")]
pub use backends::MemcachedCache;

pub use builder::{BACKEND_ENV_VAR, BackendKind, ScopedCacheBuilder, UnknownBackend};
pub use codecs::JsonCodec;
pub use facade::{CacheStats, CacheStrategy, ScopedCache};
pub use scope::RequestScope;
pub use traits::{CacheBackend, CacheCodec};

// Re-export async_trait for user convenience when implementing CacheBackend
pub use async_trait::async_trait;
