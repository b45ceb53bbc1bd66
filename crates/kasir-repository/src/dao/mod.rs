//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions.
//! Each DAO interface maps to one data source.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl, cache-aside) → DAO (interface + impl) → MySQL
//! ```

pub mod customer_dao;
pub mod r#impl;
pub mod transaction_dao;

pub use customer_dao::CustomerDao;
pub use r#impl::{MySqlCustomerDaoImpl, MySqlTransactionDaoImpl};
pub use transaction_dao::TransactionDao;
