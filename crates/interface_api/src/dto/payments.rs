//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use domain_ledger::Payment;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub billing_id: i64,
    pub amount: i64,
}

/// A stored payment; `billing_id` is implied by the request
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub payer_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.value(),
            payer_id: payment.payer_id.value(),
            amount: payment.amount,
            created_at: payment.created_at,
        }
    }
}
