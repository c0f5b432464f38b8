//! Directional billing records
//!
//! A billing is the running total a payer has paid toward a receiver. The
//! pair is ordered: (A, B) and (B, A) are two independent records and are
//! never netted against each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BillingId, UserId};
use crate::error::LedgerError;

/// An ordered (payer, receiver) pair of distinct users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPair {
    payer_id: UserId,
    receiver_id: UserId,
}

impl BillingPair {
    /// Creates a pair, rejecting a user billed to themselves
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPair` if both ids are equal
    pub fn new(payer_id: UserId, receiver_id: UserId) -> Result<Self, LedgerError> {
        if payer_id == receiver_id {
            return Err(LedgerError::InvalidPair(payer_id));
        }
        Ok(Self { payer_id, receiver_id })
    }

    /// The paying side
    pub fn payer_id(&self) -> UserId {
        self.payer_id
    }

    /// The receiving side
    pub fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    /// The same users in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            payer_id: self.receiver_id,
            receiver_id: self.payer_id,
        }
    }
}

/// A directional running total between two users
///
/// # Invariants
///
/// - At most one billing exists per ordered pair
/// - `amount` starts at zero and only grows through recorded payments
/// - `amount` equals the sum of the billing's payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    /// Store-assigned identifier
    pub id: BillingId,
    /// User who pays
    pub payer_id: UserId,
    /// User who receives
    pub receiver_id: UserId,
    /// Accrued total of all payments
    pub amount: i64,
    /// When the billing was opened
    pub created_at: DateTime<Utc>,
}

impl Billing {
    /// Returns the ordered pair this billing tracks
    pub fn pair(&self) -> BillingPair {
        BillingPair {
            payer_id: self.payer_id,
            receiver_id: self.receiver_id,
        }
    }

    /// Adds a payment amount onto the running total
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for non-positive amounts and
    /// `LedgerError::InvalidInput` if the total would overflow.
    pub fn accrue(&mut self, amount: i64) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.amount = self.amount.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidInput(format!("billing {} total would overflow", self.id))
        })?;
        Ok(())
    }
}

/// Data for opening a new billing
#[derive(Debug, Clone)]
pub struct NewBilling {
    pub pair: BillingPair,
    pub created_at: DateTime<Utc>,
}

impl NewBilling {
    /// Opens a billing for the pair at the current time with a zero total
    pub fn now(pair: BillingPair) -> Self {
        Self {
            pair,
            created_at: Utc::now(),
        }
    }
}
