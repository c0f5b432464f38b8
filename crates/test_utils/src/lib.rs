//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Well-known users and seeded in-memory stores
//! - `builders`: Builder patterns for ledger scenarios and domain values
//! - `assertions`: Assertion helpers for ledger invariants
//! - `database`: PostgreSQL test containers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use database::*;
pub use generators::*;
