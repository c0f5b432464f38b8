//! Payment records
//!
//! A payment is one immutable accrual event against a billing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BillingId, PaymentId, UserId};
use crate::billing::Billing;
use crate::error::LedgerError;

/// A recorded payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned identifier
    pub id: PaymentId,
    /// Copied from the billing's payer
    pub payer_id: UserId,
    /// Billing this payment accrued onto
    pub billing_id: BillingId,
    /// Positive amount paid
    pub amount: i64,
    /// When the payment was recorded
    pub created_at: DateTime<Utc>,
}

/// A validated payment that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub billing_id: BillingId,
    pub payer_id: UserId,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl NewPayment {
    /// Prepares a payment against a resolved billing
    ///
    /// The payer is taken from the billing, never from the caller.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount` is zero or negative
    pub fn against(billing: &Billing, amount: i64) -> Result<Self, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        Ok(Self {
            billing_id: billing.id,
            payer_id: billing.payer_id,
            amount,
            created_at: Utc::now(),
        })
    }
}
