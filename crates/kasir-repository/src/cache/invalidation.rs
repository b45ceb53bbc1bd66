//! Cache invalidation applied after committed writes.

use super::{cache_keys, CacheInterface};
use crate::query::listing_matches;
use kasir_config::InvalidationMode;
use kasir_core::{Customer, KasirResult, Transaction};
use tracing::debug;

/// Drops the cache entries a new customer can make stale.
///
/// A customer without transactions appears in no listing, so targeted mode
/// only removes the customer's own lookup key.
pub async fn invalidate_customer(
    cache: &dyn CacheInterface,
    mode: InvalidationMode,
    customer: &Customer,
) -> KasirResult<u64> {
    match mode {
        InvalidationMode::Flush => cache.delete_pattern(&cache_keys::namespace_pattern()).await,
        InvalidationMode::Targeted => {
            let deleted = cache.delete(&cache_keys::customer_by_name(&customer.name)).await?;
            Ok(u64::from(deleted))
        }
    }
}

/// Drops every cached listing the new transaction would appear in.
///
/// Listing keys are read from the tag set and parsed back into their
/// filters. Keys that cannot be parsed are dropped as well.
pub async fn invalidate_transaction(
    cache: &dyn CacheInterface,
    mode: InvalidationMode,
    transaction: &Transaction,
) -> KasirResult<u64> {
    if mode == InvalidationMode::Flush {
        return cache.delete_pattern(&cache_keys::namespace_pattern()).await;
    }

    let members = cache.tag_members(cache_keys::TRANSACTION_PAGE_TAG).await?;
    let stale: Vec<String> = members
        .into_iter()
        .filter(|key| {
            cache_keys::parse_transaction_page(key)
                .map_or(true, |filter| listing_matches(&filter, transaction))
        })
        .collect();

    if stale.is_empty() {
        return Ok(0);
    }

    let deleted = cache.delete_many(&stale).await?;
    cache
        .remove_from_tag(cache_keys::TRANSACTION_PAGE_TAG, &stale)
        .await?;
    debug!("Invalidated {} cached listings for transaction {}", stale.len(), transaction.id);
    Ok(deleted)
}
