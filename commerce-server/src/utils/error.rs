//! Unified error handling
//!
//! Provides the application-wide error type and response envelope.
//!
//! # Error code scheme
//!
//! | Code | Meaning |
//! |-------|---------|
//! | E0000 | Success |
//! | E0002 | Validation failed |
//! | E0003 | Resource not found |
//! | E0004 | Conflict (duplicate payment, shipment exists, already paid) |
//! | E0005 | Business rule violation (invalid state) |
//! | E0101 | Insufficient stock |
//! | E0102 | Invalid coupon |
//! | E0103 | Invalid amount |
//! | E0104 | Invalid refund target |
//! | E0105 | Carrier required |
//! | E0106 | Unrecognized status value |
//! | E9002 | Database error |
//! | E9001 | Internal error |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DomainError;
use tracing::error;

/// Unified API response structure
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

pub type AppResult<T> = Result<T, AppError>;

fn classify_domain(err: &DomainError) -> (StatusCode, &'static str) {
    match err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),
        DomainError::AlreadyExists(_)
        | DomainError::DuplicatePayment(_)
        | DomainError::AlreadyPaid(_) => (StatusCode::CONFLICT, "E0004"),
        DomainError::InvalidState(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E0005"),
        DomainError::InsufficientStock { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "E0101"),
        DomainError::InvalidCoupon(_) => (StatusCode::BAD_REQUEST, "E0102"),
        DomainError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "E0103"),
        DomainError::InvalidRefundTarget(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E0104"),
        DomainError::MissingCarrier(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E0105"),
        DomainError::InvalidStatus(_) => (StatusCode::BAD_REQUEST, "E0106"),
        DomainError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9002"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Domain(err) => {
                let (status, code) = classify_domain(err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!(target: "database", error = %err, "Storage error occurred");
                    (status, code, "Database error".to_string())
                } else {
                    (status, code, err.to_string())
                }
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_classification() {
        let (status, code) = classify_domain(&DomainError::NotFound("Order X".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "E0003");

        let (status, code) = classify_domain(&DomainError::InsufficientStock {
            product: "Widget".into(),
            requested: 5,
            available: 2,
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "E0101");

        let (status, _) = classify_domain(&DomainError::DuplicatePayment("x".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = classify_domain(&DomainError::Storage("io".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
