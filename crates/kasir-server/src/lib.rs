//! # Kasir Server Library
//!
//! Dependency injection wiring, logging set-up and start-up output for the
//! Kasir server binary.

pub mod di;
pub mod logging;
pub mod startup;
