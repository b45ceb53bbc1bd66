//! Transaction service trait definition.

use crate::dto::{CreateTransactionRequest, PaginationResponse, TransactionResponse};
use kasir_core::{Interface, KasirResult, TransactionQueryOptions};
use async_trait::async_trait;

/// Transaction service trait.
#[async_trait]
pub trait TransactionService: Interface + Send + Sync {
    /// Records a sale, creating the customer on first use of its name.
    async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> KasirResult<TransactionResponse>;

    /// Lists transactions matching the given filter, newest first.
    async fn list_transactions(
        &self,
        options: &TransactionQueryOptions,
    ) -> KasirResult<PaginationResponse<TransactionResponse>>;
}
