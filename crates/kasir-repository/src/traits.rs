//! Repository trait definitions.

use async_trait::async_trait;
use kasir_core::{Customer, Interface, KasirResult, Pagination, Transaction, TransactionQueryOptions};

/// Customer store with cache-aside reads.
#[async_trait]
pub trait CustomerRepository: Interface + Send + Sync {
    /// Finds a customer by name, cache first.
    ///
    /// Returns `KasirError::NotFound` when no customer has that name.
    async fn find_by_name(&self, name: &str) -> KasirResult<Customer>;

    /// Stores a new customer, stamping `created_at`, then invalidates the
    /// affected cache entries.
    async fn store(&self, customer: Customer) -> KasirResult<Customer>;
}

/// Transaction store with cache-aside listings.
#[async_trait]
pub trait TransactionRepository: Interface + Send + Sync {
    /// Stores a new transaction, stamping `created_at`, then invalidates
    /// the cached listings it belongs to.
    async fn store(&self, transaction: Transaction) -> KasirResult<Transaction>;

    /// Returns one page of transactions matching `options`, cache first.
    async fn get_all(&self, options: &TransactionQueryOptions) -> KasirResult<Pagination<Transaction>>;
}
