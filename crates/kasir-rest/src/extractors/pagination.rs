//! Listing query parameters.

use kasir_core::TransactionQueryOptions;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string of `GET /transaction`.
///
/// `limit` and `page` are kept as raw strings: anything that does not parse
/// as an integer becomes `0` and is then normalized to the defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionListQuery {
    /// Menu substring, or an exact price when numeric.
    #[serde(default)]
    pub query: Option<String>,
    /// Customer name substring.
    #[serde(default)]
    pub customer: Option<String>,
    /// Page size.
    #[serde(default)]
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// 1-based page number.
    #[serde(default)]
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

fn lenient_int(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

impl From<TransactionListQuery> for TransactionQueryOptions {
    fn from(query: TransactionListQuery) -> Self {
        TransactionQueryOptions::new(
            lenient_int(query.limit.as_deref()),
            lenient_int(query.page.as_deref()),
            query.query.unwrap_or_default(),
            query.customer.unwrap_or_default(),
        )
    }
}
