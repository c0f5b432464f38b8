//! Domain Adapters
//!
//! Connects the ledger domain's port traits to the PostgreSQL repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLedgerAdapter;
//! use domain_ledger::UserPort;
//!
//! let adapter = PostgresLedgerAdapter::new(pool);
//! let user = adapter.find_user_by_id(user_id).await?;
//! ```

pub mod ledger;

pub use ledger::PostgresLedgerAdapter;
