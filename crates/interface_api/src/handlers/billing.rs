//! Billing handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use core_kernel::BillingId;

use crate::{AppState, error::{ApiError, ErrorResponse}};
use crate::handlers::parse_path_id;
use crate::dto::billing::*;
use crate::dto::payments::PaymentResponse;

/// Gets the billing for `payer_id -> receiver_id`, creating it on first use
#[utoipa::path(
    get,
    path = "/billing",
    tag = "billings",
    params(BillingQuery),
    responses(
        (status = 200, description = "Existing or newly opened billing", body = BillingResponse),
        (status = 400, description = "Same user twice, unknown payer or receiver, or bad ids", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_or_create_billing(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<BillingResponse>, ApiError> {
    let Query(pairs) = query?;
    let strict = state.config.strict_ids;
    let (payer_id, receiver_id) = BillingQuery::from_pairs(pairs, strict)?.ids(strict)?;
    let billing = state
        .services
        .billings
        .get_or_create_billing(payer_id, receiver_id)
        .await?;
    Ok(Json(billing.into()))
}

/// Gets a billing by ID
#[utoipa::path(
    get,
    path = "/billing/{id}",
    tag = "billings",
    params(("id" = u64, Path, description = "Billing ID")),
    responses(
        (status = 200, description = "Billing found", body = BillingResponse),
        (status = 400, description = "Invalid billing ID", body = ErrorResponse),
        (status = 404, description = "No such billing", body = ErrorResponse)
    )
)]
pub async fn get_billing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillingResponse>, ApiError> {
    let id = parse_billing_id(&id)?;
    let billing = state.services.billings.get_billing_by_id(id).await?;
    Ok(Json(billing.into()))
}

/// Lists the payments recorded against a billing, oldest first
#[utoipa::path(
    get,
    path = "/billing/{id}/payments",
    tag = "billings",
    params(("id" = u64, Path, description = "Billing ID")),
    responses(
        (status = 200, description = "Payments in creation order", body = [PaymentResponse]),
        (status = 400, description = "Invalid billing ID", body = ErrorResponse),
        (status = 404, description = "No such billing", body = ErrorResponse)
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let id = parse_billing_id(&id)?;
    let payments = state.services.payments.payments_for_billing(id).await?;
    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}

fn parse_billing_id(raw: &str) -> Result<BillingId, ApiError> {
    parse_path_id(raw, "Invalid billing ID").map(BillingId::new)
}
