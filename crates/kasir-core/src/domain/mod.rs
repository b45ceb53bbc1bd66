//! Domain entities.

pub mod customer;
pub mod transaction;

pub use customer::Customer;
pub use transaction::{compute_total, Transaction};
