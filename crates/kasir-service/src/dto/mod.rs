//! Data Transfer Objects (DTOs).

mod transaction_dto;

pub use transaction_dto::*;
