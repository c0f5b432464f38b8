//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the pairwise ledger using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! return row structs, and [`adapters::PostgresLedgerAdapter`] implements
//! the domain ports on top of them.
//!
//! # Consistency
//!
//! - `billings` has a unique key on `(payer_id, receiver_id)`; billing
//!   creation is `INSERT ... ON CONFLICT DO NOTHING`
//! - recording a payment inserts the payment and increments the billing
//!   total inside one transaction
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresLedgerAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ledger")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresLedgerAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use adapters::PostgresLedgerAdapter;
