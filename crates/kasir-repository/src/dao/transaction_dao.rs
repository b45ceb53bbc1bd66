//! `TransactionDao` trait: low-level transaction data access abstraction.

use crate::query::TransactionQuery;
use async_trait::async_trait;
use kasir_core::{Interface, KasirResult, Transaction};

/// Low-level transaction data access object.
#[async_trait]
pub trait TransactionDao: Interface + Send + Sync {
    /// Persists a new transaction inside a serializable transaction.
    async fn insert(&self, transaction: &Transaction) -> KasirResult<Transaction>;

    /// Runs a listing query, returning the page rows and the total number of
    /// matching rows, both read in one serializable transaction.
    async fn fetch_page(&self, query: &TransactionQuery) -> KasirResult<(Vec<Transaction>, u64)>;
}
