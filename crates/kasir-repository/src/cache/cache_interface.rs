//! Cache interface trait for abstracted caching operations.

use kasir_core::KasirResult;
use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// This trait provides an abstraction over caching implementations,
/// allowing for easy swapping between Redis, in-memory, or disabled backends.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> KasirResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> KasirResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> KasirResult<bool>;

    /// Delete several keys at once. Returns the number of keys deleted.
    async fn delete_many(&self, keys: &[String]) -> KasirResult<u64>;

    /// Delete every key matching a glob pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> KasirResult<u64>;

    /// Add `key` to the tag set `tag`, refreshing the set's TTL.
    async fn add_to_tag(&self, tag: &str, key: &str, ttl: Duration) -> KasirResult<()>;

    /// Keys currently recorded under `tag`.
    async fn tag_members(&self, tag: &str) -> KasirResult<Vec<String>>;

    /// Remove keys from the tag set `tag`.
    async fn remove_from_tag(&self, tag: &str, keys: &[String]) -> KasirResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
///
/// This trait provides generic get/set methods that work with any serializable type.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// Backend failures and decode failures are both errors; callers decide
    /// which of them to tolerate.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> KasirResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> KasirResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
