//! API error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use thiserror::Error;
use tracing::error;

use domain_ledger::LedgerError;

/// API error types
///
/// Every variant carries the machine code rendered in the `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {message}")]
    NotFound { code: &'static str, message: String },

    #[error("Bad request: {message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable code such as `invalid_pair`
    #[schema(example = "invalid_pair")]
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// Shorthand for a malformed request
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: "invalid_input",
            message: message.into(),
        }
    }

    /// Maps an error raised while recording a payment
    ///
    /// A missing billing here is a problem with the request body, so it is
    /// reported as 400 rather than 404.
    pub fn from_payment_error(err: LedgerError) -> Self {
        match err {
            LedgerError::BillingNotFound(_) => ApiError::BadRequest {
                code: err.code(),
                message: err.to_string(),
            },
            other => ApiError::from(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::NotFound { code, message } => (code, message),
            ApiError::BadRequest { code, message } => (code, message),
            ApiError::Conflict(msg) => ("already_exists", msg),
            ApiError::Internal(msg) => ("persistence_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let code = err.code();
        match err {
            LedgerError::UserNotFound(_) | LedgerError::BillingNotFound(_) => ApiError::NotFound {
                code,
                message: err.to_string(),
            },
            LedgerError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            LedgerError::Persistence(source) => {
                error!(error = %source, "Store operation failed");
                ApiError::Internal(format!("Persistence error: {}", source))
            }
            LedgerError::InvalidInput(_)
            | LedgerError::InvalidPair(_)
            | LedgerError::PayerNotFound(_)
            | LedgerError::ReceiverNotFound(_)
            | LedgerError::InvalidAmount(_) => ApiError::BadRequest {
                code,
                message: err.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{BillingId, PortError, UserId};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::InvalidInput("name".into()), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidPair(UserId::new(1)), StatusCode::BAD_REQUEST),
            (LedgerError::PayerNotFound(UserId::new(9)), StatusCode::BAD_REQUEST),
            (LedgerError::ReceiverNotFound(UserId::new(9)), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidAmount(0), StatusCode::BAD_REQUEST),
            (LedgerError::UserNotFound("id 4".into()), StatusCode::NOT_FOUND),
            (LedgerError::BillingNotFound(BillingId::new(4)), StatusCode::NOT_FOUND),
            (LedgerError::AlreadyExists("Ana".into()), StatusCode::CONFLICT),
            (
                LedgerError::Persistence(PortError::connection("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_missing_billing_on_payment_is_bad_request() {
        let err = ApiError::from_payment_error(LedgerError::BillingNotFound(BillingId::new(3)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest { code: "billing_not_found", .. }));
    }
}
