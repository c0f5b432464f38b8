//! HTTP API Layer
//!
//! This crate exposes the pairwise ledger over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for users, billings and payments
//! - **Middleware**: Tracing and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: `{"error", "message"}` bodies with mapped status codes
//! - **Docs**: OpenAPI document and Swagger UI
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//! use domain_ledger::memory::InMemoryLedgerStore;
//! use std::sync::Arc;
//!
//! let app = create_router(Arc::new(InMemoryLedgerStore::new()), ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod doc;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use core_kernel::HealthCheckable;
use domain_ledger::{BillingPort, LedgerServices, PaymentPort, UserPort};

use crate::config::ApiConfig;
use crate::doc::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::middleware::request_log_middleware;
use crate::handlers::{users, billing, payments, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: LedgerServices,
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Store backing every ledger port
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router<S>(store: Arc<S>, config: ApiConfig) -> Router
where
    S: UserPort + BillingPort + PaymentPort,
{
    let state = AppState {
        services: LedgerServices::new(store.clone()),
        health: store,
        config,
    };

    // Liveness and readiness
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let ledger_routes = Router::new()
        .route("/user", post(users::create_user))
        .route("/user/:id", get(users::get_user))
        .route("/billing", get(billing::get_or_create_billing))
        .route("/billing/:id", get(billing::get_billing))
        .route("/billing/:id/payments", get(billing::list_payments))
        .route("/payment", post(payments::create_payment))
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(health_routes)
        .merge(ledger_routes)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
