//! Payment handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use core_kernel::BillingId;

use crate::{AppState, error::{ApiError, ErrorResponse}};
use crate::dto::payments::*;

/// Records a payment and accrues it onto its billing
#[utoipa::path(
    post,
    path = "/payment",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Unknown billing, non-positive amount, or overflowing total", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let Json(request) = payload?;
    let payment = state
        .services
        .payments
        .create_payment(BillingId::new(request.billing_id), request.amount)
        .await
        .map_err(ApiError::from_payment_error)?;
    Ok(Json(payment.into()))
}
