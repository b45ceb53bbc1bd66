//! # Kasir Repository
//!
//! Four-layer data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn TransactionRepository>   (domain interface)
//! TransactionRepositoryImpl             (cache-aside, invalidation)
//!   ↓  Arc<dyn TransactionDao>          (DAO interface)
//! MySqlTransactionDaoImpl               (DAO impl, MySQL via SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                       ← CustomerRepository, TransactionRepository
//!   query.rs                        ← TransactionQueryBuilder
//!   cache/                          ← CacheInterface, backends, keys, invalidation
//!   impl/
//!     customer_repository_impl.rs
//!     transaction_repository_impl.rs
//!   dao/
//!     customer_dao.rs, transaction_dao.rs
//!     impl/mysql/                   ← MySqlCustomerDaoImpl, MySqlTransactionDaoImpl
//! ```

pub mod cache;
pub mod dao;
pub mod pool;
pub mod query;
pub mod traits;
pub mod r#impl;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cache::{CacheInterface, MemoryCacheService, RedisCacheService, RedisCacheServiceParameters};
pub use dao::{CustomerDao, MySqlCustomerDaoImpl, MySqlTransactionDaoImpl, TransactionDao};
pub use dao::r#impl::mysql::{MySqlCustomerDaoImplParameters, MySqlTransactionDaoImplParameters};
pub use pool::*;
pub use query::{TransactionQuery, TransactionQueryBuilder};
pub use r#impl::{
    CustomerRepositoryImpl, CustomerRepositoryImplParameters, TransactionRepositoryImpl,
    TransactionRepositoryImplParameters,
};
pub use traits::*;
