//! # Kasir REST
//!
//! REST API layer using Axum for Kasir.
//! Provides the transaction endpoints under the configured base path plus
//! health checks and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;

pub use router::*;
pub use state::*;
