//! MySQL DAO implementations (SQLx).

mod customer_dao_impl;
mod transaction_dao_impl;

pub use customer_dao_impl::{MySqlCustomerDaoImpl, MySqlCustomerDaoImplParameters};
pub use transaction_dao_impl::{MySqlTransactionDaoImpl, MySqlTransactionDaoImplParameters};

use kasir_core::{KasirError, KasirResult};
use sqlx::{Connection, MySql, MySqlConnection, Transaction};
use uuid::Uuid;

/// Starts a SERIALIZABLE transaction on `conn`.
///
/// `SET TRANSACTION` applies to the next transaction of the session only, so
/// the pooled connection returns to the server default afterwards.
async fn begin_serializable(conn: &mut MySqlConnection) -> KasirResult<Transaction<'_, MySql>> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *conn)
        .await?;
    Ok(conn.begin().await?)
}

fn parse_uuid(column: &str, value: &str) -> KasirResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| KasirError::Internal(format!("Invalid UUID in {column}: {e}")))
}
