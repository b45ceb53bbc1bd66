//! MySQL implementation of [`TransactionDao`].
//!
//! [`TransactionDao`]: crate::dao::TransactionDao

use super::{begin_serializable, parse_uuid};
use crate::query::{QueryArg, TransactionQuery};
use crate::{dao::TransactionDao, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kasir_core::{
    with_timeout, CustomerId, KasirError, KasirResult, Transaction, TransactionId, DEFAULT_CALL_TIMEOUT,
};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// MySQL-backed transaction DAO.
#[derive(Component, Clone)]
#[shaku(interface = TransactionDao)]
pub struct MySqlTransactionDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    #[shaku(default = DEFAULT_CALL_TIMEOUT)]
    timeout: Duration,
}

impl MySqlTransactionDaoImpl {
    /// Creates a new MySQL transaction DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Database row representation of a listed transaction.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: String,
    customer_id: String,
    customer_name: String,
    menu: String,
    price: i64,
    qty: i64,
    payment: String,
    total: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = KasirError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_uuid(parse_uuid("transaction.id", &row.id)?),
            customer_id: CustomerId::from_uuid(parse_uuid("transaction.customer_id", &row.customer_id)?),
            customer_name: row.customer_name,
            menu: row.menu,
            price: row.price,
            qty: row.qty,
            payment: row.payment,
            total: row.total,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TransactionDao for MySqlTransactionDaoImpl {
    async fn insert(&self, transaction: &Transaction) -> KasirResult<Transaction> {
        debug!("DAO: insert transaction {}", transaction.id);

        with_timeout(self.timeout, "mysql transaction insert", async {
            let mut conn = self.pool.inner().acquire().await?;
            let mut tx = begin_serializable(&mut conn).await?;

            // Dropping `tx` on the error path rolls back.
            sqlx::query(
                "INSERT INTO `transaction` (id, customer_id, menu, price, qty, payment, total, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(transaction.id.to_string())
            .bind(transaction.customer_id.to_string())
            .bind(&transaction.menu)
            .bind(transaction.price)
            .bind(transaction.qty)
            .bind(&transaction.payment)
            .bind(transaction.total)
            .bind(transaction.created_at)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(())
        })
        .await?;

        Ok(transaction.clone())
    }

    async fn fetch_page(&self, query: &TransactionQuery) -> KasirResult<(Vec<Transaction>, u64)> {
        debug!(
            "DAO: fetch page limit={} offset={} args={}",
            query.limit,
            query.offset,
            query.args.len()
        );

        let (rows, total) = with_timeout(self.timeout, "mysql transaction listing", async {
            let mut conn = self.pool.inner().acquire().await?;
            let mut tx = begin_serializable(&mut conn).await?;

            let mut select = sqlx::query_as::<_, TransactionRow>(&query.select_sql);
            for arg in &query.args {
                select = match arg {
                    QueryArg::Int(v) => select.bind(*v),
                    QueryArg::Text(s) => select.bind(s.as_str()),
                };
            }
            let rows = select
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&mut *tx)
                .await?;

            let mut count = sqlx::query_scalar::<_, i64>(&query.count_sql);
            for arg in &query.args {
                count = match arg {
                    QueryArg::Int(v) => count.bind(*v),
                    QueryArg::Text(s) => count.bind(s.as_str()),
                };
            }
            let total = count.fetch_one(&mut *tx).await?;

            tx.commit().await?;
            Ok((rows, total))
        })
        .await?;

        let rows = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<KasirResult<Vec<_>>>()?;
        let total = u64::try_from(total)
            .map_err(|_| KasirError::Database(format!("negative row count: {total}")))?;

        Ok((rows, total))
    }
}

impl std::fmt::Debug for MySqlTransactionDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlTransactionDaoImpl")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
