//! Transaction controller.

use crate::{
    extractors::{TransactionListQuery, ValidatedJson},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use kasir_core::TransactionQueryOptions;
use kasir_service::{CreateTransactionRequest, PaginationResponse, TransactionResponse};
use tracing::debug;

/// Creates the transaction router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/transaction",
        get(list_transactions).post(create_transaction),
    )
}

/// Record a sale.
#[utoipa::path(
    post,
    path = "/transaction",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Invalid request", body = kasir_core::ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), AppError> {
    debug!("Create transaction request: {}", request.name);

    let response = state.transaction_service.create_transaction(request).await?;
    Ok(created(response))
}

/// List transactions, newest first.
#[utoipa::path(
    get,
    path = "/transaction",
    tag = "transactions",
    params(TransactionListQuery),
    responses(
        (status = 200, description = "One page of transactions", body = PaginationResponse<TransactionResponse>)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<PaginationResponse<TransactionResponse>> {
    let options = TransactionQueryOptions::from(query);
    debug!("List transactions request: {:?}", options);

    let response = state.transaction_service.list_transactions(&options).await?;
    ok(response)
}
