//! Ledger Domain - Users, Directional Billings, and Payments
//!
//! This crate holds the accrual rules of the pairwise ledger. Users register
//! under a unique name; for each ordered (payer, receiver) pair there is at
//! most one billing whose running total grows with every recorded payment.
//!
//! # Invariants
//!
//! - A billing's pair has two distinct users
//! - (A, B) and (B, A) are independent billings; totals are never netted
//! - A billing's amount starts at zero and equals the sum of its payments
//! - Validation runs before any write
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::LedgerServices;
//!
//! let services = LedgerServices::new(store);
//! let ana = services.users.create_user("Ana").await?;
//! let bruno = services.users.create_user("Bruno").await?;
//!
//! let billing = services.billings.get_or_create_billing(ana.id, bruno.id).await?;
//! services.payments.create_payment(billing.id, 150).await?;
//! ```

pub mod user;
pub mod billing;
pub mod payment;
pub mod ports;
pub mod registry;
pub mod ledger;
pub mod recorder;
pub mod error;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

use std::sync::Arc;

pub use user::User;
pub use billing::{Billing, BillingPair, NewBilling};
pub use payment::{Payment, NewPayment};
pub use ports::{UserPort, BillingPort, PaymentPort};
pub use registry::UserRegistry;
pub use ledger::BillingLedger;
pub use recorder::PaymentRecorder;
pub use error::LedgerError;

/// The three ledger services wired to one store
#[derive(Clone)]
pub struct LedgerServices {
    pub users: UserRegistry,
    pub billings: BillingLedger,
    pub payments: PaymentRecorder,
}

impl LedgerServices {
    /// Wires every service to the same store handle
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: UserPort + BillingPort + PaymentPort,
    {
        Self {
            users: UserRegistry::new(store.clone()),
            billings: BillingLedger::new(store.clone(), store.clone()),
            payments: PaymentRecorder::new(store.clone(), store),
        }
    }
}
