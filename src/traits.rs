//! Backend and Codec Traits
//!
//! This module defines the trait abstractions that allow users to plug in
//! custom cache stores and serialization codecs.
//!
//! # Architecture
//!
//! - `CacheCodec`: Trait for pluggable serialization backends
//! - `CacheBackend`: Core trait every cache store adapter implements
//!
//! # Example: Custom Backend
//!
//! ```rust,ignore
//! use scoped_cache::{CacheBackend, async_trait};
//! use std::time::Duration;
//! use anyhow::Result;
//!
//! struct MyStore {
//!     // Your implementation
//! }
//!
//! #[async_trait]
//! impl CacheBackend for MyStore {
//!     async fn get(&self, key: &str) -> Option<Vec<u8>> {
//!         // Your implementation
//!     }
//!
//!     async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
//!         // Your implementation
//!     }
//!
//!     async fn remove(&self, key: &str) -> Result<()> {
//!         // Your implementation
//!     }
//!
//!     async fn contains(&self, key: &str) -> bool {
//!         // Your implementation
//!     }
//!
//!     async fn clear(&self) -> Result<()> {
//!         // Your implementation
//!     }
//!
//!     async fn health_check(&self) -> bool {
//!         // Your implementation
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;

/// Trait for cache value serialization/deserialization
///
/// Provides a pluggable serialization abstraction so the facade can store
/// arbitrary `Serialize` values in byte-oriented backends. The built-in
/// implementation is [`JsonCodec`](crate::codecs::JsonCodec).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync + Debug` to support concurrent access
/// across async tasks.
pub trait CacheCodec: Send + Sync + Debug {
    /// Serialize a value to bytes
    ///
    /// # Returns
    ///
    /// * `Ok(bytes)` - Serialized byte representation
    /// * `Err(e)` - Serialization failed
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Deserialize bytes to a value
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - Deserialized value
    /// * `Err(e)` - Deserialization failed
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Get the name of the codec
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str;
}

/// Core cache backend trait
///
/// This trait defines the operations the facade forwards to whichever store
/// is configured. Implement it to adapt any key-value store, in-process or
/// networked, as a backend.
///
/// # Required Operations
///
/// - `get`: Retrieve a value by key
/// - `set_with_ttl`: Store a value with a time-to-live
/// - `remove`: Delete a value by key
/// - `contains`: Check key presence without fetching the value
/// - `clear`: Drop every entry the backend holds
/// - `health_check`: Verify the backend is operational
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent access across
/// async tasks.
///
/// # Semantics
///
/// The facade treats `Err` from `set_with_ttl`, `remove`, and `clear` as a
/// rejected operation and reports it as `false` to callers; it performs no
/// retries. Backends should therefore not retry internally either.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get value from the backend by key
    ///
    /// # Returns
    ///
    /// * `Some(value)` - Value found (as bytes)
    /// * `None` - Key not found or expired
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Set value with time-to-live
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Value accepted by the store
    /// * `Err(e)` - Store rejected the write
    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Remove value from the backend
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Value removed (or didn't exist)
    /// * `Err(e)` - Store operation failed
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a key is present and unexpired
    async fn contains(&self, key: &str) -> bool;

    /// Remove every entry from the backend
    ///
    /// For networked stores this flushes the whole database the adapter is
    /// connected to, so it affects every client of that store.
    async fn clear(&self) -> Result<()>;

    /// Check if the backend is healthy
    ///
    /// For networked stores this typically involves a ping or a write/read
    /// round-trip.
    async fn health_check(&self) -> bool;

    /// Get the name of this backend
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str {
        "unknown"
    }
}
