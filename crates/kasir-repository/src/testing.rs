//! In-memory doubles for tests of the repositories and the layers above them.

use crate::cache::CacheInterface;
use crate::dao::{CustomerDao, TransactionDao};
use crate::query::TransactionQuery;
use async_trait::async_trait;
use kasir_core::{Customer, KasirError, KasirResult, Transaction};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct InMemoryCustomerDao {
    pub customers: Mutex<Vec<Customer>>,
    pub lookups: AtomicUsize,
    pub fail_inserts: AtomicBool,
}

impl InMemoryCustomerDao {
    pub fn with_customer(customer: Customer) -> Self {
        let dao = Self::default();
        dao.customers.lock().unwrap().push(customer);
        dao
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CustomerDao for InMemoryCustomerDao {
    async fn find_by_name(&self, name: &str) -> KasirResult<Option<Customer>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn insert(&self, customer: &Customer) -> KasirResult<Customer> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(KasirError::Database("insert rejected".to_string()));
        }
        self.customers.lock().unwrap().push(customer.clone());
        Ok(customer.clone())
    }
}

/// Ignores the SQL filter and pages over every stored row, newest first.
#[derive(Default)]
pub struct InMemoryTransactionDao {
    pub transactions: Mutex<Vec<Transaction>>,
    pub fetches: AtomicUsize,
    pub fail_fetches: AtomicBool,
}

impl InMemoryTransactionDao {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionDao for InMemoryTransactionDao {
    async fn insert(&self, transaction: &Transaction) -> KasirResult<Transaction> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(transaction.clone())
    }

    async fn fetch_page(&self, query: &TransactionQuery) -> KasirResult<(Vec<Transaction>, u64)> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(KasirError::Database("serialization failure".to_string()));
        }
        let mut all = self.transactions.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len() as u64;
        let rows = all
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap())
            .take(usize::try_from(query.limit).unwrap())
            .collect();
        Ok((rows, total))
    }
}

/// A cache whose every call fails, as when Redis is unreachable.
#[derive(Default)]
pub struct FailingCache;

fn down<T>() -> KasirResult<T> {
    Err(KasirError::cache("connection refused"))
}

#[async_trait]
impl CacheInterface for FailingCache {
    async fn get_raw(&self, _key: &str) -> KasirResult<Option<String>> {
        down()
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> KasirResult<()> {
        down()
    }

    async fn delete(&self, _key: &str) -> KasirResult<bool> {
        down()
    }

    async fn delete_many(&self, _keys: &[String]) -> KasirResult<u64> {
        down()
    }

    async fn delete_pattern(&self, _pattern: &str) -> KasirResult<u64> {
        down()
    }

    async fn add_to_tag(&self, _tag: &str, _key: &str, _ttl: Duration) -> KasirResult<()> {
        down()
    }

    async fn tag_members(&self, _tag: &str) -> KasirResult<Vec<String>> {
        down()
    }

    async fn remove_from_tag(&self, _tag: &str, _keys: &[String]) -> KasirResult<()> {
        down()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
