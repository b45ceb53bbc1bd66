//! MySQL implementation of [`CustomerDao`].
//!
//! [`CustomerDao`]: crate::dao::CustomerDao

use super::parse_uuid;
use crate::{dao::CustomerDao, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kasir_core::{with_timeout, Customer, CustomerId, KasirError, KasirResult, DEFAULT_CALL_TIMEOUT};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// MySQL-backed customer DAO.
#[derive(Component, Clone)]
#[shaku(interface = CustomerDao)]
pub struct MySqlCustomerDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    #[shaku(default = DEFAULT_CALL_TIMEOUT)]
    timeout: Duration,
}

impl MySqlCustomerDaoImpl {
    /// Creates a new MySQL customer DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Database row representation of a customer.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String, // CHAR(36)
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = KasirError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId::from_uuid(parse_uuid("customer.id", &row.id)?),
            name: row.name,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CustomerDao for MySqlCustomerDaoImpl {
    async fn find_by_name(&self, name: &str) -> KasirResult<Option<Customer>> {
        debug!("DAO: find customer by name '{}'", name);

        let row = with_timeout(self.timeout, "mysql customer lookup", async {
            Ok(sqlx::query_as::<_, CustomerRow>(
                "SELECT id, name, created_at FROM customer WHERE name = ? LIMIT 1",
            )
            .bind(name)
            .fetch_optional(self.pool.inner())
            .await?)
        })
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn insert(&self, customer: &Customer) -> KasirResult<Customer> {
        debug!("DAO: insert customer {}", customer.id);

        with_timeout(self.timeout, "mysql customer insert", async {
            sqlx::query("INSERT INTO customer (id, name, created_at) VALUES (?, ?, ?)")
                .bind(customer.id.to_string())
                .bind(&customer.name)
                .bind(customer.created_at)
                .execute(self.pool.inner())
                .await?;
            Ok(())
        })
        .await?;

        Ok(customer.clone())
    }
}

impl std::fmt::Debug for MySqlCustomerDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCustomerDaoImpl")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
