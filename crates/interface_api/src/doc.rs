//! OpenAPI document for the ledger API
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable through Swagger
//! UI at `/swagger`.

use utoipa::OpenApi;

use crate::dto::billing::BillingResponse;
use crate::dto::payments::{CreatePaymentRequest, PaymentResponse};
use crate::dto::users::{CreateUserRequest, UserResponse};
use crate::error::ErrorResponse;
use crate::handlers::health::HealthResponse;

/// Path the JSON document is served from
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Mount point of the Swagger UI
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pairwise ledger API",
        description = "Users, directional billings between them, and payments accrued onto billings."
    ),
    paths(
        crate::handlers::users::create_user,
        crate::handlers::users::get_user,
        crate::handlers::billing::get_or_create_billing,
        crate::handlers::billing::get_billing,
        crate::handlers::billing::list_payments,
        crate::handlers::payments::create_payment,
        crate::handlers::health::health_check,
        crate::handlers::health::readiness_check,
    ),
    components(schemas(
        CreateUserRequest,
        UserResponse,
        BillingResponse,
        CreatePaymentRequest,
        PaymentResponse,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "billings", description = "Directional billings between two users"),
        (name = "payments", description = "Payments accrued onto billings"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/user",
            "/user/{id}",
            "/billing",
            "/billing/{id}",
            "/billing/{id}/payments",
            "/payment",
            "/health",
            "/health/ready",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_registers_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;
        for name in ["ErrorResponse", "BillingResponse", "PaymentResponse", "UserResponse"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }
}
