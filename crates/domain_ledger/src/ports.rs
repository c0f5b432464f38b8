//! Ledger Domain Ports
//!
//! Storage interfaces the ledger services depend on. Two adapters exist:
//!
//! - **PostgreSQL**: `infra_db::adapters::PostgresLedgerAdapter`
//! - **In-memory**: [`crate::memory::InMemoryLedgerStore`] (feature `memory`)
//!
//! Lookups return `Ok(None)` for missing rows; the services decide which
//! domain error a miss becomes (a missing user is a `PayerNotFound` in one
//! operation and a `UserNotFound` in another).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerServices, memory::InMemoryLedgerStore};
//! use std::sync::Arc;
//!
//! let services = LedgerServices::new(Arc::new(InMemoryLedgerStore::new()));
//! let ana = services.users.create_user("Ana").await?;
//! ```

use async_trait::async_trait;

use core_kernel::{BillingId, DomainPort, HealthCheckable, PortError, UserId};

use crate::billing::{Billing, BillingPair, NewBilling};
use crate::payment::{NewPayment, Payment};
use crate::user::User;

/// Storage operations for users
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    /// Retrieves a user by ID
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Retrieves a user by exact name
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, PortError>;

    /// Inserts a new user with a store-assigned ID
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` if the store's unique constraint on
    /// the name rejects the insert
    async fn insert_user(&self, name: &str) -> Result<User, PortError>;
}

/// Storage operations for billings
#[async_trait]
pub trait BillingPort: DomainPort {
    /// Retrieves a billing by ID
    async fn find_billing_by_id(&self, id: BillingId) -> Result<Option<Billing>, PortError>;

    /// Retrieves the billing for exactly this ordered pair
    async fn find_billing_by_pair(&self, pair: BillingPair) -> Result<Option<Billing>, PortError>;

    /// Inserts a billing unless one already exists for the pair
    ///
    /// The existence check and the insert are a single atomic step.
    ///
    /// # Returns
    ///
    /// `Some(billing)` if this call created the row, `None` if another
    /// writer created it first
    async fn try_insert_billing(&self, billing: NewBilling) -> Result<Option<Billing>, PortError>;
}

/// Storage operations for payments
#[async_trait]
pub trait PaymentPort: DomainPort {
    /// Stores a payment and adds its amount onto the billing total
    ///
    /// Both writes happen atomically: either the payment exists and the
    /// billing total includes it, or neither changed.
    ///
    /// # Returns
    ///
    /// The stored payment and the billing after accrual
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the billing no longer exists
    async fn record_payment(&self, payment: NewPayment) -> Result<(Payment, Billing), PortError>;

    /// Lists payments recorded against a billing, oldest first
    async fn list_payments_by_billing(&self, billing_id: BillingId) -> Result<Vec<Payment>, PortError>;
}
