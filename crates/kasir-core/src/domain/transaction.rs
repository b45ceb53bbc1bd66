//! Transaction entity.

use crate::{Customer, CustomerId, KasirError, KasirResult, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An append-only point-of-sale record.
///
/// `total` always equals `price * qty`; the only way to build one is
/// [`Transaction::new`], which computes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction.
    pub id: TransactionId,

    /// Owning customer.
    pub customer_id: CustomerId,

    /// Customer name as it was when the transaction was recorded.
    pub customer_name: String,

    /// Item sold.
    pub menu: String,

    /// Unit price.
    pub price: i64,

    /// Quantity sold.
    pub qty: i64,

    /// Payment method, e.g. `Cash`.
    pub payment: String,

    /// `price * qty`.
    pub total: i64,

    /// Creation timestamp, assigned by the store on insert.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction for `customer`, computing the total.
    ///
    /// # Errors
    ///
    /// Returns `KasirError::Validation` when `price * qty` overflows.
    pub fn new(
        customer: &Customer,
        menu: impl Into<String>,
        price: i64,
        qty: i64,
        payment: impl Into<String>,
    ) -> KasirResult<Self> {
        let total = compute_total(price, qty)?;
        Ok(Self {
            id: TransactionId::new(),
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            menu: menu.into(),
            price,
            qty,
            payment: payment.into(),
            total,
            created_at: Utc::now(),
        })
    }
}

/// `price * qty`, rejecting overflow.
pub fn compute_total(price: i64, qty: i64) -> KasirResult<i64> {
    price
        .checked_mul(qty)
        .ok_or_else(|| KasirError::validation(format!("total overflows: price {price} * qty {qty}")))
}
