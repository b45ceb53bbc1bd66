//! `CustomerDao` trait: low-level customer data access abstraction.

use async_trait::async_trait;
use kasir_core::{Customer, Interface, KasirResult};

/// Low-level customer data access object.
///
/// [`crate::CustomerRepositoryImpl`] layers caching on top of it.
#[async_trait]
pub trait CustomerDao: Interface + Send + Sync {
    /// Finds a customer by exact name. The first match wins.
    async fn find_by_name(&self, name: &str) -> KasirResult<Option<Customer>>;

    /// Persists a new customer, returning it as stored.
    async fn insert(&self, customer: &Customer) -> KasirResult<Customer>;
}
