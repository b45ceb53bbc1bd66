//! `TransactionRepositoryImpl`: cache-aside transaction store.

use super::stamp_now;
use crate::cache::{cache_keys, invalidation, CacheExt, CacheInterface, CachedEntry, DEFAULT_TTL};
use crate::query::TransactionQueryBuilder;
use crate::{dao::TransactionDao, traits::TransactionRepository};
use async_trait::async_trait;
use kasir_config::InvalidationMode;
use kasir_core::{KasirError, KasirResult, Pagination, Transaction, TransactionQueryOptions};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Transaction repository backed by a [`TransactionDao`] and a cache.
#[derive(Component)]
#[shaku(interface = TransactionRepository)]
pub struct TransactionRepositoryImpl {
    #[shaku(inject)]
    transaction_dao: Arc<dyn TransactionDao>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    #[shaku(default)]
    invalidation: InvalidationMode,
}

impl TransactionRepositoryImpl {
    /// Creates a new `TransactionRepositoryImpl`.
    #[must_use]
    pub fn new(
        transaction_dao: Arc<dyn TransactionDao>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
        invalidation: InvalidationMode,
    ) -> Self {
        Self {
            transaction_dao,
            cache,
            ttl,
            invalidation,
        }
    }
}

#[async_trait]
impl TransactionRepository for TransactionRepositoryImpl {
    async fn store(&self, mut transaction: Transaction) -> KasirResult<Transaction> {
        transaction.created_at = stamp_now();
        let stored = self.transaction_dao.insert(&transaction).await?;
        info!(
            "Transaction created: {} for customer {} (total {})",
            stored.id, stored.customer_id, stored.total
        );

        match invalidation::invalidate_transaction(self.cache.as_ref(), self.invalidation, &stored).await {
            Ok(n) => debug!("Invalidated {} cache entries", n),
            Err(e) => warn!("Cache invalidation after transaction insert failed: {}", e),
        }

        Ok(stored)
    }

    async fn get_all(&self, options: &TransactionQueryOptions) -> KasirResult<Pagination<Transaction>> {
        let query = TransactionQueryBuilder::build(options);
        debug!("Listing query built for key '{}'", query.cache_key);

        match self.cache.get::<CachedEntry>(&query.cache_key).await {
            Ok(Some(entry)) => return entry.into_transaction_page(),
            Ok(None) => {}
            Err(e @ KasirError::Serialization(_)) => return Err(e),
            Err(e) => warn!("Listing cache read failed, falling back to MySQL: {}", e),
        }

        let (rows, total_rows) = self.transaction_dao.fetch_page(&query).await?;
        let page = Pagination::new(total_rows, query.limit, query.page, rows);

        self.cache
            .set(&query.cache_key, &CachedEntry::TransactionPage(page.clone()), self.ttl)
            .await?;
        self.cache
            .add_to_tag(cache_keys::TRANSACTION_PAGE_TAG, &query.cache_key, self.ttl)
            .await?;

        Ok(page)
    }
}

impl std::fmt::Debug for TransactionRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionRepositoryImpl")
            .field("ttl", &self.ttl)
            .field("invalidation", &self.invalidation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheService;
    use crate::testing::{FailingCache, InMemoryTransactionDao};
    use kasir_core::Customer;
    use std::sync::atomic::Ordering;

    fn repository(
        dao: Arc<InMemoryTransactionDao>,
        cache: Arc<dyn CacheInterface>,
        invalidation: InvalidationMode,
    ) -> TransactionRepositoryImpl {
        TransactionRepositoryImpl::new(dao, cache, DEFAULT_TTL, invalidation)
    }

    fn pizza_for_john() -> Transaction {
        let customer = Customer::new("John Doe");
        Transaction::new(&customer, "Pizza", 10, 2, "Cash").unwrap()
    }

    #[tokio::test]
    async fn test_get_all_caches_and_serves_identical_pages() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let cache = Arc::new(MemoryCacheService::new());
        let repo = repository(dao.clone(), cache.clone(), InvalidationMode::Targeted);
        repo.store(pizza_for_john()).await.unwrap();

        let opts = TransactionQueryOptions::new(1, 1, "pizza", "john");
        let fresh = repo.get_all(&opts).await.unwrap();
        let cached = repo.get_all(&opts).await.unwrap();

        assert_eq!(dao.fetches(), 1);
        assert_eq!(fresh, cached);
        assert_eq!(fresh.total_rows, 1);
        assert_eq!(fresh.total_pages(), 1);

        let tagged = cache.tag_members(cache_keys::TRANSACTION_PAGE_TAG).await.unwrap();
        assert_eq!(tagged, vec!["kasir:cache:tx:1:1:pizza:john".to_string()]);
    }

    #[tokio::test]
    async fn test_get_all_normalizes_paging() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let repo = repository(dao, Arc::new(MemoryCacheService::new()), InvalidationMode::Targeted);

        let page = repo.get_all(&TransactionQueryOptions::new(-1, 0, "", "")).await.unwrap();
        assert_eq!((page.limit, page.page, page.total_rows), (10, 1, 0));
        assert!(page.rows.is_empty());
    }

    #[tokio::test]
    async fn test_store_invalidates_matching_listing() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let cache = Arc::new(MemoryCacheService::new());
        let repo = repository(dao.clone(), cache.clone(), InvalidationMode::Targeted);

        let all = TransactionQueryOptions::new(10, 1, "", "");
        let burgers = TransactionQueryOptions::new(10, 1, "burger", "");
        assert_eq!(repo.get_all(&all).await.unwrap().total_rows, 0);
        repo.get_all(&burgers).await.unwrap();
        assert_eq!(dao.fetches(), 2);

        repo.store(pizza_for_john()).await.unwrap();

        assert_eq!(repo.get_all(&all).await.unwrap().total_rows, 1);
        assert_eq!(dao.fetches(), 3, "matching listing is refetched");
        repo.get_all(&burgers).await.unwrap();
        assert_eq!(dao.fetches(), 3, "unrelated listing stays cached");
    }

    #[tokio::test]
    async fn test_flush_mode_refetches_everything() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let repo = repository(dao.clone(), Arc::new(MemoryCacheService::new()), InvalidationMode::Flush);

        let burgers = TransactionQueryOptions::new(10, 1, "burger", "");
        repo.get_all(&burgers).await.unwrap();
        repo.store(pizza_for_john()).await.unwrap();
        repo.get_all(&burgers).await.unwrap();
        assert_eq!(dao.fetches(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        dao.fail_fetches.store(true, Ordering::SeqCst);
        let cache = Arc::new(MemoryCacheService::new());
        let repo = repository(dao, cache.clone(), InvalidationMode::Targeted);

        let err = repo.get_all(&TransactionQueryOptions::default()).await.unwrap_err();
        assert!(matches!(err, KasirError::Database(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_cache_write_failure_after_fresh_listing_is_surfaced() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let repo = repository(dao.clone(), Arc::new(FailingCache), InvalidationMode::Targeted);

        let err = repo.get_all(&TransactionQueryOptions::default()).await.unwrap_err();
        assert!(matches!(err, KasirError::Cache(_)));
        assert_eq!(dao.fetches(), 1, "read failure falls through to MySQL");
    }

    #[tokio::test]
    async fn test_store_survives_invalidation_failure() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let repo = repository(dao.clone(), Arc::new(FailingCache), InvalidationMode::Targeted);

        let stored = repo.store(pizza_for_john()).await.unwrap();
        assert_eq!(stored.total, 20);
        assert_eq!(dao.transactions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_listing_is_surfaced() {
        let dao = Arc::new(InMemoryTransactionDao::default());
        let cache = Arc::new(MemoryCacheService::new());
        cache
            .set_raw("kasir:cache:tx:10:1::", r#"{"type":"customer","data":{}}"#, DEFAULT_TTL)
            .await
            .unwrap();
        let repo = repository(dao.clone(), cache, InvalidationMode::Targeted);

        let err = repo.get_all(&TransactionQueryOptions::default()).await.unwrap_err();
        assert!(matches!(err, KasirError::Serialization(_)));
        assert_eq!(dao.fetches(), 0);
    }
}
