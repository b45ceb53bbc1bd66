//! # Kasir Service
//!
//! Application layer for Kasir: request/response DTOs, the pagination
//! assembler and the transaction orchestrator that resolves or creates the
//! customer before recording a sale.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod transaction_service;

pub use dto::*;
pub use r#impl::{TransactionServiceImpl, TransactionServiceImplParameters};
pub use transaction_service::*;
