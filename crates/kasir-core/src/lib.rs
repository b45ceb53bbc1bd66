//! # Kasir Core
//!
//! Core types, entities, and error definitions for Kasir.
//! This crate provides the foundational abstractions shared by the
//! repository, service, and REST layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod timeout;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use timeout::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
