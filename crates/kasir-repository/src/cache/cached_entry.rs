//! Envelope for every payload written to the cache.

use kasir_core::{Customer, KasirError, KasirResult, Pagination, Transaction};
use serde::{Deserialize, Serialize};

/// A cached payload, serialized as `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CachedEntry {
    /// A customer looked up by name.
    Customer(Customer),
    /// One page of a transaction listing.
    TransactionPage(Pagination<Transaction>),
}

impl CachedEntry {
    /// Unwraps a customer entry.
    pub fn into_customer(self) -> KasirResult<Customer> {
        match self {
            Self::Customer(customer) => Ok(customer),
            other => Err(unexpected("customer", &other)),
        }
    }

    /// Unwraps a listing entry.
    pub fn into_transaction_page(self) -> KasirResult<Pagination<Transaction>> {
        match self {
            Self::TransactionPage(page) => Ok(page),
            other => Err(unexpected("transaction_page", &other)),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Customer(_) => "customer",
            Self::TransactionPage(_) => "transaction_page",
        }
    }
}

fn unexpected(expected: &str, found: &CachedEntry) -> KasirError {
    KasirError::Serialization(format!(
        "expected cached {expected}, found {}",
        found.kind()
    ))
}
