//! Transaction service implementation.

use crate::dto::{CreateTransactionRequest, PaginationResponse, TransactionResponse};
use crate::transaction_service::TransactionService;
use async_trait::async_trait;
use kasir_core::{
    compute_total, Customer, KasirResult, Transaction, TransactionQueryOptions, ValidateExt,
};
use kasir_repository::{CustomerRepository, TransactionRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Transaction orchestrator for Shaku DI.
///
/// ```text
/// validate → total → find customer ─┬─ found ─────────────┬→ build → persist
///                                   └─ missing → create ──┘
/// ```
///
/// A customer created on the way is kept even when persisting the
/// transaction fails.
#[derive(Component)]
#[shaku(interface = TransactionService)]
pub struct TransactionServiceImpl {
    #[shaku(inject)]
    customer_repository: Arc<dyn CustomerRepository>,
    #[shaku(inject)]
    transaction_repository: Arc<dyn TransactionRepository>,
}

impl TransactionServiceImpl {
    /// Creates a new transaction service.
    #[must_use]
    pub fn new(
        customer_repository: Arc<dyn CustomerRepository>,
        transaction_repository: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            customer_repository,
            transaction_repository,
        }
    }

    async fn resolve_customer(&self, name: &str) -> KasirResult<Customer> {
        match self.customer_repository.find_by_name(name).await {
            Ok(customer) => {
                debug!("Customer '{}' resolved to {}", name, customer.id);
                Ok(customer)
            }
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Customer lookup for '{}' failed, creating a new one: {}", name, e);
                }
                let created = self.customer_repository.store(Customer::new(name)).await?;
                info!("New customer '{}' registered as {}", name, created.id);
                Ok(created)
            }
        }
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> KasirResult<TransactionResponse> {
        debug!("Creating transaction: {} x{} for {}", request.menu, request.qty, request.name);

        request.validate_request()?;
        compute_total(request.price, request.qty)?;

        let customer = self.resolve_customer(&request.name).await?;
        let transaction = Transaction::new(
            &customer,
            request.menu,
            request.price,
            request.qty,
            request.payment,
        )?;

        let stored = self.transaction_repository.store(transaction).await?;
        Ok(TransactionResponse::from(stored))
    }

    async fn list_transactions(
        &self,
        options: &TransactionQueryOptions,
    ) -> KasirResult<PaginationResponse<TransactionResponse>> {
        debug!(
            "Listing transactions, limit: {}, page: {}, query: '{}', customer: '{}'",
            options.limit, options.page, options.query, options.customer_name
        );

        let page = self.transaction_repository.get_all(options).await?;
        Ok(PaginationResponse::from(page))
    }
}

impl std::fmt::Debug for TransactionServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionServiceImpl").finish_non_exhaustive()
    }
}
