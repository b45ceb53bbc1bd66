//! `CustomerRepositoryImpl`: cache-aside customer store.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn CustomerRepository>
//! CustomerRepositoryImpl       ← cache-aside, invalidation
//!   ↓ Arc<dyn CustomerDao>     ↓ Arc<dyn CacheInterface>
//! MySqlCustomerDaoImpl         RedisCacheService / MemoryCacheService
//! ```

use super::stamp_now;
use crate::cache::{cache_keys, invalidation, CacheExt, CacheInterface, CachedEntry, DEFAULT_TTL};
use crate::{dao::CustomerDao, traits::CustomerRepository};
use async_trait::async_trait;
use kasir_config::InvalidationMode;
use kasir_core::{Customer, KasirError, KasirResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Customer repository backed by a [`CustomerDao`] and a cache.
#[derive(Component)]
#[shaku(interface = CustomerRepository)]
pub struct CustomerRepositoryImpl {
    #[shaku(inject)]
    customer_dao: Arc<dyn CustomerDao>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    #[shaku(default)]
    invalidation: InvalidationMode,
}

impl CustomerRepositoryImpl {
    /// Creates a new `CustomerRepositoryImpl`.
    #[must_use]
    pub fn new(
        customer_dao: Arc<dyn CustomerDao>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
        invalidation: InvalidationMode,
    ) -> Self {
        Self {
            customer_dao,
            cache,
            ttl,
            invalidation,
        }
    }
}

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    async fn find_by_name(&self, name: &str) -> KasirResult<Customer> {
        let key = cache_keys::customer_by_name(name);

        match self.cache.get::<CachedEntry>(&key).await {
            Ok(Some(entry)) => {
                debug!("Customer '{}' served from cache", name);
                return entry.into_customer();
            }
            Ok(None) => debug!("Customer '{}' not cached", name),
            Err(e @ KasirError::Serialization(_)) => return Err(e),
            Err(e) => warn!("Customer cache read failed, falling back to MySQL: {}", e),
        }

        let customer = self
            .customer_dao
            .find_by_name(name)
            .await?
            .ok_or_else(|| KasirError::not_found("Customer", name))?;

        if let Err(e) = self
            .cache
            .set(&key, &CachedEntry::Customer(customer.clone()), self.ttl)
            .await
        {
            warn!("Failed to cache customer '{}': {}", name, e);
        }

        Ok(customer)
    }

    async fn store(&self, mut customer: Customer) -> KasirResult<Customer> {
        customer.created_at = stamp_now();
        let stored = self.customer_dao.insert(&customer).await?;
        info!("Customer created: {} ({})", stored.id, stored.name);

        if let Err(e) =
            invalidation::invalidate_customer(self.cache.as_ref(), self.invalidation, &stored).await
        {
            warn!("Cache invalidation after customer insert failed: {}", e);
        }

        Ok(stored)
    }
}

impl std::fmt::Debug for CustomerRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerRepositoryImpl")
            .field("ttl", &self.ttl)
            .field("invalidation", &self.invalidation)
            .finish_non_exhaustive()
    }
}
