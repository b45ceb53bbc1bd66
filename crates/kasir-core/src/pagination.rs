//! Listing options and page-shaped results.

use serde::{Deserialize, Serialize};

/// Filter and paging options for a transaction listing.
///
/// `limit` and `page` are accepted as given and normalized by
/// [`TransactionQueryOptions::normalized`]: non-positive values fall back to
/// [`DEFAULT_LIMIT`](Self::DEFAULT_LIMIT) and page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQueryOptions {
    /// Rows per page.
    pub limit: i64,
    /// 1-based page number.
    pub page: i64,
    /// Integer price to match exactly, otherwise a menu substring.
    pub query: String,
    /// Customer name substring.
    pub customer_name: String,
}

impl TransactionQueryOptions {
    /// Page size used when the caller supplies none.
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Creates options from raw values.
    #[must_use]
    pub fn new(limit: i64, page: i64, query: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            limit,
            page,
            query: query.into(),
            customer_name: customer_name.into(),
        }
    }

    /// Returns a copy with `limit` and `page` defaulted.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            limit: if self.limit <= 0 { Self::DEFAULT_LIMIT } else { self.limit },
            page: if self.page <= 0 { 1 } else { self.page },
            query: self.query.clone(),
            customer_name: self.customer_name.clone(),
        }
    }

    /// Row offset of the normalized page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let opts = self.normalized();
        (opts.page - 1).saturating_mul(opts.limit)
    }

    /// The integer price filter, if `query` parses as one.
    #[must_use]
    pub fn price_filter(&self) -> Option<i64> {
        self.query.parse::<i64>().ok()
    }
}

/// One page of rows plus the total count of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination<T> {
    /// Rows matching the filter, ignoring limit and offset.
    pub total_rows: u64,
    /// Page size used for the query.
    pub limit: i64,
    /// 1-based page number.
    pub page: i64,
    /// Rows of this page in listing order.
    pub rows: Vec<T>,
}

impl<T> Pagination<T> {
    /// Creates a page.
    #[must_use]
    pub const fn new(total_rows: u64, limit: i64, page: i64, rows: Vec<T>) -> Self {
        Self {
            total_rows,
            limit,
            page,
            rows,
        }
    }

    /// Number of pages, `ceil(total_rows / limit)`.
    ///
    /// Zero when nothing matched or the limit is not positive.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        match u64::try_from(self.limit) {
            Ok(limit) if limit > 0 && self.total_rows > 0 => self.total_rows.div_ceil(limit),
            _ => 0,
        }
    }

    /// Maps the rows to another type.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Pagination<U> {
        Pagination {
            total_rows: self.total_rows,
            limit: self.limit,
            page: self.page,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
