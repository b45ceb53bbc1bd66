//! Cache key generators for consistent key naming.

use kasir_core::TransactionQueryOptions;

/// Prefix for all cache keys to namespace them.
pub const CACHE_PREFIX: &str = "kasir:cache";

/// Tag set indexing every cached transaction listing.
pub const TRANSACTION_PAGE_TAG: &str = "kasir:cache:tag:tx";

/// Generate a cache key for a customer by name.
#[must_use]
pub fn customer_by_name(name: &str) -> String {
    format!("{}:customer:{}", CACHE_PREFIX, name.to_lowercase())
}

/// Generate a cache key for a transaction listing.
///
/// Options are normalized first, so `limit = 0` and `limit = 10` share a key.
#[must_use]
pub fn transaction_page(options: &TransactionQueryOptions) -> String {
    let opts = options.normalized();
    format!(
        "{}:tx:{}:{}:{}:{}",
        CACHE_PREFIX,
        opts.limit,
        opts.page,
        opts.query.to_lowercase(),
        opts.customer_name.to_lowercase()
    )
}

/// Recovers the listing options from a key built by [`transaction_page`].
///
/// Returns `None` for foreign keys and for keys whose filters contain `:`,
/// which cannot be split unambiguously.
#[must_use]
pub fn parse_transaction_page(key: &str) -> Option<TransactionQueryOptions> {
    let rest = key.strip_prefix(CACHE_PREFIX)?.strip_prefix(":tx:")?;
    let mut parts = rest.split(':');
    let limit = parts.next()?.parse().ok()?;
    let page = parts.next()?.parse().ok()?;
    let query = parts.next()?;
    let customer_name = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(TransactionQueryOptions::new(limit, page, query, customer_name))
}

/// Pattern matching every key in the namespace.
#[must_use]
pub fn namespace_pattern() -> String {
    format!("{}:*", CACHE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_by_name_key() {
        assert_eq!(customer_by_name("John Doe"), "kasir:cache:customer:john doe");
    }

    #[test]
    fn test_transaction_page_key_is_case_insensitive() {
        let a = transaction_page(&TransactionQueryOptions::new(1, 1, "PIZZA", "John"));
        let b = transaction_page(&TransactionQueryOptions::new(1, 1, "pizza", "JOHN"));
        assert_eq!(a, b);
        assert_eq!(a, "kasir:cache:tx:1:1:pizza:john");
    }

    #[test]
    fn test_transaction_page_key_uses_normalized_paging() {
        let key = transaction_page(&TransactionQueryOptions::new(0, 0, "", ""));
        assert_eq!(key, "kasir:cache:tx:10:1::");
    }

    #[test]
    fn test_parse_transaction_page() {
        let opts = TransactionQueryOptions::new(5, 3, "piz", "ann");
        let parsed = parse_transaction_page(&transaction_page(&opts)).unwrap();
        assert_eq!(parsed, opts);

        let empty = parse_transaction_page("kasir:cache:tx:10:1::").unwrap();
        assert!(empty.query.is_empty());
        assert!(empty.customer_name.is_empty());
    }

    #[test]
    fn test_parse_rejects_foreign_and_ambiguous_keys() {
        assert!(parse_transaction_page("kasir:cache:customer:john").is_none());
        assert!(parse_transaction_page("other:tx:10:1::").is_none());
        assert!(parse_transaction_page("kasir:cache:tx:10:1:a:b:c").is_none());
        assert!(parse_transaction_page("kasir:cache:tx:ten:1::").is_none());
    }

    #[test]
    fn test_namespace_pattern() {
        assert_eq!(namespace_pattern(), "kasir:cache:*");
    }
}
