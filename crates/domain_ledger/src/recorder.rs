//! Payment recorder service

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{BillingId, PortError};
use crate::error::LedgerError;
use crate::payment::{NewPayment, Payment};
use crate::ports::{BillingPort, PaymentPort};

/// Records payments and accrues them onto their billing
#[derive(Clone)]
pub struct PaymentRecorder {
    billings: Arc<dyn BillingPort>,
    payments: Arc<dyn PaymentPort>,
}

impl PaymentRecorder {
    /// Creates a recorder backed by the given ports
    pub fn new(billings: Arc<dyn BillingPort>, payments: Arc<dyn PaymentPort>) -> Self {
        Self { billings, payments }
    }

    /// Records a payment against a billing
    ///
    /// Steps, each short-circuiting on failure:
    /// 1. resolve the billing (`BillingNotFound`, reported even when the
    ///    amount is also invalid)
    /// 2. validate the amount (`InvalidAmount`)
    /// 3. store the payment and accrue it onto the billing in one atomic
    ///    write (`InvalidInput` if the total would overflow, otherwise
    ///    `Persistence`)
    ///
    /// # Returns
    ///
    /// The stored payment; the updated billing is not returned
    pub async fn create_payment(
        &self,
        billing_id: BillingId,
        amount: i64,
    ) -> Result<Payment, LedgerError> {
        let billing = self
            .billings
            .find_billing_by_id(billing_id)
            .await?
            .ok_or(LedgerError::BillingNotFound(billing_id))?;

        let new_payment = NewPayment::against(&billing, amount).inspect_err(|_| {
            warn!(billing_id = %billing_id, amount, "Rejected non-positive payment");
        })?;

        let (payment, accrued) = self
            .payments
            .record_payment(new_payment)
            .await
            .map_err(|e| match e {
                PortError::NotFound { .. } => LedgerError::BillingNotFound(billing_id),
                PortError::Validation { message, .. } => {
                    warn!(billing_id = %billing_id, amount, %message, "Store rejected payment");
                    LedgerError::InvalidInput(message)
                }
                other => LedgerError::Persistence(other),
            })?;

        info!(
            payment_id = %payment.id,
            billing_id = %billing_id,
            amount = payment.amount,
            billing_total = accrued.amount,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Lists the payments recorded against a billing, oldest first
    ///
    /// # Errors
    ///
    /// Returns `BillingNotFound` if the billing does not exist
    pub async fn payments_for_billing(&self, billing_id: BillingId) -> Result<Vec<Payment>, LedgerError> {
        if self.billings.find_billing_by_id(billing_id).await?.is_none() {
            return Err(LedgerError::BillingNotFound(billing_id));
        }
        Ok(self.payments.list_payments_by_billing(billing_id).await?)
    }
}
