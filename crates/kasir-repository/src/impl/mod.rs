//! Repository implementations.
//!
//! Each repository coordinates one DAO with the cache: reads go to the cache
//! first, writes go to the DAO and then invalidate.

mod customer_repository_impl;
mod transaction_repository_impl;

pub use customer_repository_impl::{CustomerRepositoryImpl, CustomerRepositoryImplParameters};
pub use transaction_repository_impl::{TransactionRepositoryImpl, TransactionRepositoryImplParameters};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision MySQL `DATETIME(6)` keeps.
fn stamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
