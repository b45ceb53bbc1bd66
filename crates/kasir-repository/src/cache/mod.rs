//! Caching infrastructure for the repository layer.
//!
//! This module provides a cache abstraction with Redis and in-memory
//! implementations, the key scheme shared by both, and the invalidation
//! applied after writes.

mod cache_interface;
pub mod cache_keys;
mod cached_entry;
pub mod invalidation;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cached_entry::CachedEntry;
pub use memory_cache::MemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
