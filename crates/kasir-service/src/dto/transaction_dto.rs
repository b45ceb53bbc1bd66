//! Transaction DTOs.

use kasir_core::validation::rules::not_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request to record a sale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    /// Customer name; an unknown name creates the customer.
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Menu must not be blank"))]
    pub menu: String,

    #[validate(range(min = 1, message = "Price must be at least 1"))]
    pub price: i64,

    #[validate(range(min = 1, message = "Qty must be at least 1"))]
    pub qty: i64,

    #[validate(custom(function = "not_blank", message = "Payment must not be blank"))]
    pub payment: String,
}

/// Transaction response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    /// Customer name.
    pub name: String,
    pub menu: String,
    pub price: i64,
    pub qty: i64,
    pub payment: String,
    pub total: i64,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse<T> {
    pub total_rows: u64,
    pub limit: i64,
    pub current_page: i64,
    pub total_pages: u64,
    pub rows: Vec<T>,
}

impl<T> PaginationResponse<T> {
    /// An empty page with every counter at zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_rows: 0,
            limit: 0,
            current_page: 0,
            total_pages: 0,
            rows: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::{KasirError, ValidateExt};

    fn request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            name: "John Doe".to_string(),
            menu: "Pizza".to_string(),
            price: 10,
            qty: 2,
            payment: "Cash".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate_request().is_ok());
    }

    #[test]
    fn test_blank_fields_and_zero_amounts_are_rejected() {
        let bad = CreateTransactionRequest {
            name: "   ".to_string(),
            price: 0,
            qty: -1,
            ..request()
        };

        let err = bad.validate_request().unwrap_err();
        let KasirError::Validation(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(message.contains("name: Name must not be blank"));
        assert!(message.contains("price: Price must be at least 1"));
        assert!(message.contains("qty: Qty must be at least 1"));
        assert!(!message.contains("menu"));
    }

    #[test]
    fn test_request_uses_name_on_the_wire() {
        let json = r#"{"name":"Ann","menu":"Soup","price":5,"qty":1,"payment":"Card"}"#;
        let parsed: CreateTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "Ann");
        assert_eq!(parsed.payment, "Card");
    }
}
