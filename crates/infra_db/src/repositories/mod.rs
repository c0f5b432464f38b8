//! Repository implementations for ledger tables
//!
//! Repositories encapsulate SQL and map rows to plain row structs; the
//! adapter layer converts rows to domain types.
//!
//! Queries are checked at runtime (`query_as::<_, Row>`), so the crate
//! builds without a live database.

pub mod user;
pub mod billing;
pub mod payment;

pub use user::UserRepository;
pub use billing::BillingRepository;
pub use payment::PaymentRepository;
