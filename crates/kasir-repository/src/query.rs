//! Filtered, paginated transaction listing queries.
//!
//! [`TransactionQueryBuilder::build`] is pure: it turns listing options into
//! the page query, the matching count query, their bind arguments and the
//! cache key. [`listing_matches`] evaluates the same filter in memory so
//! invalidation can tell which cached listings a new row belongs to.

use crate::cache::cache_keys;
use kasir_core::{Transaction, TransactionQueryOptions};

const SELECT_COLUMNS: &str = "SELECT t.id, t.customer_id, c.name AS customer_name, t.menu, t.price, \
     t.qty, t.payment, t.total, t.created_at";

const FROM_JOIN: &str = "FROM `transaction` t JOIN customer c ON c.id = t.customer_id";

const ORDER_BY: &str = "ORDER BY t.created_at DESC, t.id DESC";

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    /// Integer parameter.
    Int(i64),
    /// String parameter.
    Text(String),
}

/// A built listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Page query. Its trailing `LIMIT ? OFFSET ?` take [`limit`](Self::limit)
    /// and [`offset`](Self::offset) after [`args`](Self::args).
    pub select_sql: String,
    /// `COUNT(*)` over the same filter, without paging.
    pub count_sql: String,
    /// Filter arguments, shared by both statements.
    pub args: Vec<QueryArg>,
    /// Normalized page size.
    pub limit: i64,
    /// Normalized 1-based page.
    pub page: i64,
    /// Row offset of the page.
    pub offset: i64,
    /// Cache key for the page.
    pub cache_key: String,
}

/// Builds [`TransactionQuery`] plans.
pub struct TransactionQueryBuilder;

impl TransactionQueryBuilder {
    /// Builds the listing query for `options`.
    #[must_use]
    pub fn build(options: &TransactionQueryOptions) -> TransactionQuery {
        let opts = options.normalized();
        let (where_clause, args) = Self::build_where_clause(&opts);

        let select_sql = format!("{SELECT_COLUMNS} {FROM_JOIN}{where_clause} {ORDER_BY} LIMIT ? OFFSET ?");
        let count_sql = format!("SELECT COUNT(*) {FROM_JOIN}{where_clause}");

        TransactionQuery {
            select_sql,
            count_sql,
            args,
            limit: opts.limit,
            page: opts.page,
            offset: opts.offset(),
            cache_key: cache_keys::transaction_page(&opts),
        }
    }

    /// Returns the `WHERE` clause (with a leading space, or empty) and its
    /// arguments.
    fn build_where_clause(opts: &TransactionQueryOptions) -> (String, Vec<QueryArg>) {
        let mut conditions = Vec::new();
        let mut args = Vec::new();

        if let Some(price) = opts.price_filter() {
            conditions.push("t.price = ?");
            args.push(QueryArg::Int(price));
        } else if !opts.query.is_empty() {
            conditions.push("t.menu LIKE ?");
            args.push(QueryArg::Text(contains_pattern(&opts.query)));
        }

        if !opts.customer_name.is_empty() {
            conditions.push("c.name LIKE ?");
            args.push(QueryArg::Text(contains_pattern(&opts.customer_name)));
        }

        if conditions.is_empty() {
            (String::new(), args)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), args)
        }
    }
}

/// `%value%` with LIKE wildcards in `value` escaped.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Whether `transaction` satisfies the listing filter in `options`.
///
/// Mirrors the SQL filter under a case-insensitive collation. Non-ASCII
/// text on either side always matches, as the collation also folds accents.
#[must_use]
pub fn listing_matches(options: &TransactionQueryOptions, transaction: &Transaction) -> bool {
    let query_ok = match options.price_filter() {
        Some(price) => transaction.price == price,
        None => contains_ci(&transaction.menu, &options.query),
    };
    query_ok && contains_ci(&transaction.customer_name, &options.customer_name)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || !haystack.is_ascii() || !needle.is_ascii() {
        return true;
    }
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::Customer;

    #[test]
    fn test_no_filters_has_no_where() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::default());
        assert!(!q.select_sql.contains("WHERE"));
        assert!(!q.count_sql.contains("WHERE"));
        assert!(q.args.is_empty());
        assert_eq!((q.limit, q.page, q.offset), (10, 1, 0));
        assert!(q.select_sql.ends_with("ORDER BY t.created_at DESC, t.id DESC LIMIT ? OFFSET ?"));
        assert_eq!(q.cache_key, "kasir:cache:tx:10:1::");
    }

    #[test]
    fn test_numeric_query_filters_price() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(5, 3, "10", ""));
        assert!(q.select_sql.contains(" WHERE t.price = ? "));
        assert_eq!(q.args, vec![QueryArg::Int(10)]);
        assert_eq!(q.offset, 10);
    }

    #[test]
    fn test_padded_number_filters_menu() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(5, 1, " 10", ""));
        assert!(q.select_sql.contains(" WHERE t.menu LIKE ? "));
        assert_eq!(q.args, vec![QueryArg::Text("% 10%".to_string())]);
    }

    #[test]
    fn test_text_query_filters_menu() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(5, 1, "piz", ""));
        assert!(q.select_sql.contains(" WHERE t.menu LIKE ? "));
        assert_eq!(q.args, vec![QueryArg::Text("%piz%".to_string())]);
    }

    #[test]
    fn test_filters_are_and_combined() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(1, 1, "pizza", "john"));
        assert!(q.count_sql.ends_with(" WHERE t.menu LIKE ? AND c.name LIKE ?"));
        assert_eq!(
            q.args,
            vec![
                QueryArg::Text("%pizza%".to_string()),
                QueryArg::Text("%john%".to_string())
            ]
        );
    }

    #[test]
    fn test_customer_only_filter() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(1, 1, "", "Ann"));
        assert!(q.count_sql.ends_with(" WHERE c.name LIKE ?"));
        assert_eq!(q.args, vec![QueryArg::Text("%Ann%".to_string())]);
        assert_eq!(q.cache_key, "kasir:cache:tx:1:1::ann");
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_count_query_has_no_paging() {
        let q = TransactionQueryBuilder::build(&TransactionQueryOptions::new(1, 2, "", ""));
        assert!(q.count_sql.starts_with("SELECT COUNT(*) FROM `transaction` t JOIN customer c"));
        assert!(!q.count_sql.contains("LIMIT"));
        assert!(!q.count_sql.contains("ORDER BY"));
    }

    #[test]
    fn test_listing_matches() {
        let customer = Customer::new("John Doe");
        let tx = Transaction::new(&customer, "Pizza", 10, 2, "Cash").unwrap();

        assert!(listing_matches(&TransactionQueryOptions::default(), &tx));
        assert!(listing_matches(&TransactionQueryOptions::new(1, 1, "10", ""), &tx));
        assert!(!listing_matches(&TransactionQueryOptions::new(1, 1, "11", ""), &tx));
        assert!(listing_matches(&TransactionQueryOptions::new(1, 1, "PIZ", "john"), &tx));
        assert!(!listing_matches(&TransactionQueryOptions::new(1, 1, "piz", "ann"), &tx));
        assert!(!listing_matches(&TransactionQueryOptions::new(1, 1, "burger", ""), &tx));
    }

    #[test]
    fn test_listing_matches_accented_text() {
        let jose = Customer::new("José");
        let latte = Transaction::new(&jose, "Café Latte", 10, 1, "Cash").unwrap();

        assert!(listing_matches(&TransactionQueryOptions::new(10, 1, "cafe", "jose"), &latte));
        assert!(listing_matches(&TransactionQueryOptions::new(10, 1, "CAFÉ", ""), &latte));

        let john = Customer::new("John Doe");
        let pizza = Transaction::new(&john, "Pizza", 10, 2, "Cash").unwrap();
        assert!(listing_matches(&TransactionQueryOptions::new(10, 1, "pizzé", ""), &pizza));
        assert!(!listing_matches(&TransactionQueryOptions::new(10, 1, "cafe", ""), &pizza));
    }
}
