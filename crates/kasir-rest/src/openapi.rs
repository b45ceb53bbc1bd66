//! OpenAPI documentation configuration.

use kasir_core::{ErrorResponse, FieldError};
use kasir_service::{CreateTransactionRequest, PaginationResponse, TransactionResponse};
use utoipa::OpenApi;

use crate::controllers::HealthResponse;

/// OpenAPI documentation for the Kasir API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kasir API",
        version = "1.0.0",
        description = "Point-of-sale transaction recording and listing"
    ),
    paths(
        crate::controllers::transaction_controller::create_transaction,
        crate::controllers::transaction_controller::list_transactions,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            HealthResponse,
            CreateTransactionRequest,
            TransactionResponse,
            PaginationResponse<TransactionResponse>,
        )
    ),
    tags(
        (name = "transactions", description = "Sales recording and listing"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
