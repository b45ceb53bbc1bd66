//! Service implementations.

pub mod transaction_service_impl;

pub use transaction_service_impl::{TransactionServiceImpl, TransactionServiceImplParameters};
