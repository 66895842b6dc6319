//! Cache Codec Implementations
//!
//! This module provides built-in implementations of the
//! [`CacheCodec`](crate::traits::CacheCodec) trait.

mod json;
pub use json::JsonCodec;
