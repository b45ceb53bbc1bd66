//! Application state for Axum handlers.

use kasir_repository::DatabasePoolInterface;
use kasir_service::TransactionService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: Arc<dyn TransactionService>,
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        transaction_service: Arc<dyn TransactionService>,
        database: Arc<dyn DatabasePoolInterface>,
    ) -> Self {
        Self {
            transaction_service,
            database,
        }
    }

    /// Resolves the state's components from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn TransactionService> + HasComponent<dyn DatabasePoolInterface>,
    {
        Self::new(module.resolve(), module.resolve())
    }
}
