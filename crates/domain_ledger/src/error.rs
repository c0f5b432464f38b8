//! Ledger domain errors

use thiserror::Error;

use core_kernel::{BillingId, PortError, UserId};

/// Errors that can occur in the ledger domain
///
/// Each variant is reported to the caller as-is; nothing is retried.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or missing input at the boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payer and receiver are the same user
    #[error("payer_id and receiver_id cannot be the same (user {0})")]
    InvalidPair(UserId),

    /// A user with this name is already registered
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// User lookup failed
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Billing lookup failed
    #[error("Billing not found: {0}")]
    BillingNotFound(BillingId),

    /// The payer of a requested billing does not exist
    #[error("Payer not found: {0}")]
    PayerNotFound(UserId),

    /// The receiver of a requested billing does not exist
    #[error("Receiver not found: {0}")]
    ReceiverNotFound(UserId),

    /// Payment amount is zero or negative
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(i64),

    /// The store rejected a read or write
    #[error("Persistence error: {0}")]
    Persistence(#[from] PortError),
}

impl LedgerError {
    /// Returns a stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::InvalidPair(_) => "invalid_pair",
            LedgerError::AlreadyExists(_) => "already_exists",
            LedgerError::UserNotFound(_) => "user_not_found",
            LedgerError::BillingNotFound(_) => "billing_not_found",
            LedgerError::PayerNotFound(_) => "payer_not_found",
            LedgerError::ReceiverNotFound(_) => "receiver_not_found",
            LedgerError::InvalidAmount(_) => "invalid_amount",
            LedgerError::Persistence(_) => "persistence_error",
        }
    }

    /// Checks if this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::UserNotFound(_)
                | LedgerError::BillingNotFound(_)
                | LedgerError::PayerNotFound(_)
                | LedgerError::ReceiverNotFound(_)
        )
    }
}
