//! API response types.

use kasir_core::{ErrorResponse, KasirError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Response envelope: `{code, status, data, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    /// Canonical reason phrase, e.g. `Created`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            code: status.as_u16(),
            status: reason(status),
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(status: StatusCode, error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            code: status.as_u16(),
            status: reason(status),
            data: None,
            error: Some(error),
        }
    }
}

/// Renders an error envelope with the given status.
pub fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(ApiResponse::<()>::error(status, error))).into_response()
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub KasirError);

impl From<KasirError> for AppError {
    fn from(err: KasirError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, ErrorResponse::from_error(&self.0))
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a 200 response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(StatusCode::OK, data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(StatusCode::CREATED, data)),
    )
}
