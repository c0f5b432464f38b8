//! Core Kernel - Foundational types for the pairwise ledger
//!
//! This crate provides the building blocks shared by every other crate:
//! - Integer identifiers for users, billings and payments
//! - The port error type and marker traits for storage adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{UserId, BillingId, PaymentId};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
