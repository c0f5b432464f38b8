//! Billing ledger service
//!
//! Resolves the single directional billing for an ordered pair of users,
//! opening it with a zero total the first time it is requested.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{BillingId, PortError, UserId};
use crate::billing::{Billing, BillingPair, NewBilling};
use crate::error::LedgerError;
use crate::ports::{BillingPort, UserPort};

/// Get-or-create access to billings
#[derive(Clone)]
pub struct BillingLedger {
    users: Arc<dyn UserPort>,
    billings: Arc<dyn BillingPort>,
}

impl BillingLedger {
    /// Creates a ledger backed by the given ports
    pub fn new(users: Arc<dyn UserPort>, billings: Arc<dyn BillingPort>) -> Self {
        Self { users, billings }
    }

    /// Returns the billing for (payer, receiver), creating it if absent
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// 1. payer and receiver differ
    /// 2. the payer exists
    /// 3. the receiver exists
    ///
    /// An existing billing is returned untouched. Concurrent first calls
    /// for the same pair converge on one record.
    ///
    /// # Errors
    ///
    /// `InvalidPair`, `PayerNotFound`, `ReceiverNotFound`, or `Persistence`
    pub async fn get_or_create_billing(
        &self,
        payer_id: UserId,
        receiver_id: UserId,
    ) -> Result<Billing, LedgerError> {
        let pair = BillingPair::new(payer_id, receiver_id)?;

        if self.users.find_user_by_id(payer_id).await?.is_none() {
            return Err(LedgerError::PayerNotFound(payer_id));
        }
        if self.users.find_user_by_id(receiver_id).await?.is_none() {
            return Err(LedgerError::ReceiverNotFound(receiver_id));
        }

        if let Some(existing) = self.billings.find_billing_by_pair(pair).await? {
            debug!(billing_id = %existing.id, "Billing already open");
            return Ok(existing);
        }

        match self.billings.try_insert_billing(NewBilling::now(pair)).await? {
            Some(created) => {
                info!(
                    billing_id = %created.id,
                    payer_id = %payer_id,
                    receiver_id = %receiver_id,
                    "Billing created"
                );
                Ok(created)
            }
            None => {
                // Another request opened it between our lookup and insert.
                debug!(payer_id = %payer_id, receiver_id = %receiver_id, "Billing created concurrently");
                self.billings
                    .find_billing_by_pair(pair)
                    .await?
                    .ok_or_else(|| {
                        LedgerError::Persistence(PortError::internal(format!(
                            "billing for {} -> {} vanished after conflict",
                            payer_id, receiver_id
                        )))
                    })
            }
        }
    }

    /// Fetches a billing by ID
    ///
    /// # Errors
    ///
    /// Returns `BillingNotFound` if no billing has this ID
    pub async fn get_billing_by_id(&self, id: BillingId) -> Result<Billing, LedgerError> {
        self.billings
            .find_billing_by_id(id)
            .await?
            .ok_or(LedgerError::BillingNotFound(id))
    }
}
