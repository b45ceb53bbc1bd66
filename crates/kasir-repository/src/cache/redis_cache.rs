//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use kasir_core::{with_timeout, KasirError, KasirResult, DEFAULT_CALL_TIMEOUT};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Keys requested per SCAN round trip.
const SCAN_COUNT: usize = 500;

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    /// Upper bound for one cache call, connection checkout included.
    #[shaku(default = DEFAULT_CALL_TIMEOUT)]
    timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Create a cache service with a custom per-call timeout.
    #[must_use]
    pub fn with_call_timeout(pool: Arc<Pool>, timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> KasirResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                KasirError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(KasirError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> KasirResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        with_timeout(self.timeout, "redis GET", async {
            let mut conn = self.get_conn().await?;
            let value: Option<String> = conn.get(key).await.map_err(|e| {
                KasirError::Cache(format!("Failed to get key '{}': {}", key, e))
            })?;

            match &value {
                Some(_) => debug!("Cache hit for key '{}'", key),
                None => debug!("Cache miss for key '{}'", key),
            }

            Ok(value)
        })
        .await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> KasirResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        with_timeout(self.timeout, "redis SETEX", async {
            let mut conn = self.get_conn().await?;
            let ttl_secs = ttl.as_secs().max(1);

            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                KasirError::Cache(format!("Failed to set key '{}': {}", key, e))
            })?;

            debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> KasirResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        with_timeout(self.timeout, "redis DEL", async {
            let mut conn = self.get_conn().await?;
            let deleted: i64 = conn.del(key).await.map_err(|e| {
                KasirError::Cache(format!("Failed to delete key '{}': {}", key, e))
            })?;

            debug!("Deleted key '{}': {}", key, deleted > 0);
            Ok(deleted > 0)
        })
        .await
    }

    async fn delete_many(&self, keys: &[String]) -> KasirResult<u64> {
        if !self.is_enabled() || keys.is_empty() {
            return Ok(0);
        }

        with_timeout(self.timeout, "redis DEL", async {
            let mut conn = self.get_conn().await?;
            let deleted: i64 = conn.del(keys).await.map_err(|e| {
                KasirError::Cache(format!("Failed to delete keys: {}", e))
            })?;

            debug!("Deleted {} of {} keys", deleted, keys.len());
            Ok(u64::try_from(deleted).unwrap_or(0))
        })
        .await
    }

    async fn delete_pattern(&self, pattern: &str) -> KasirResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        with_timeout(self.timeout, "redis SCAN/DEL", async {
            let mut conn = self.get_conn().await?;
            let mut cursor: u64 = 0;
            let mut total: u64 = 0;

            loop {
                let (next, keys): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(SCAN_COUNT)
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| KasirError::Cache(format!("Failed to scan keys: {}", e)))?;

                if !keys.is_empty() {
                    let deleted: i64 = conn.del(&keys).await.map_err(|e| {
                        KasirError::Cache(format!("Failed to delete keys: {}", e))
                    })?;
                    total += u64::try_from(deleted).unwrap_or(0);
                }

                if next == 0 {
                    break;
                }
                cursor = next;
            }

            debug!("Deleted {} keys matching pattern '{}'", total, pattern);
            Ok(total)
        })
        .await
    }

    async fn add_to_tag(&self, tag: &str, key: &str, ttl: Duration) -> KasirResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        with_timeout(self.timeout, "redis SADD", async {
            let mut conn = self.get_conn().await?;
            let ttl_secs = i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX);

            let _: () = deadpool_redis::redis::pipe()
                .atomic()
                .sadd(tag, key)
                .ignore()
                .expire(tag, ttl_secs)
                .ignore()
                .query_async(&mut conn)
                .await
                .map_err(|e| KasirError::Cache(format!("Failed to tag key '{}': {}", key, e)))?;

            Ok(())
        })
        .await
    }

    async fn tag_members(&self, tag: &str) -> KasirResult<Vec<String>> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }

        with_timeout(self.timeout, "redis SMEMBERS", async {
            let mut conn = self.get_conn().await?;
            let members: Vec<String> = conn.smembers(tag).await.map_err(|e| {
                KasirError::Cache(format!("Failed to read tag '{}': {}", tag, e))
            })?;
            Ok(members)
        })
        .await
    }

    async fn remove_from_tag(&self, tag: &str, keys: &[String]) -> KasirResult<()> {
        if !self.is_enabled() || keys.is_empty() {
            return Ok(());
        }

        with_timeout(self.timeout, "redis SREM", async {
            let mut conn = self.get_conn().await?;
            conn.srem::<_, _, ()>(tag, keys).await.map_err(|e| {
                KasirError::Cache(format!("Failed to untag keys from '{}': {}", tag, e))
            })?;
            Ok(())
        })
        .await
    }
}
