//! PostgreSQL Ledger Adapter
//!
//! Implements the ledger domain ports (`UserPort`, `BillingPort`,
//! `PaymentPort`) on top of the repositories.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLedgerAdapter;
//! use domain_ledger::LedgerServices;
//! use std::sync::Arc;
//!
//! let adapter = Arc::new(PostgresLedgerAdapter::new(pool));
//! let services = LedgerServices::new(adapter);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, BillingId, DomainPort, HealthCheckResult, HealthCheckable, PaymentId,
    PortError, UserId,
};
use domain_ledger::{
    Billing, BillingPair, BillingPort, NewBilling, NewPayment, Payment, PaymentPort, User,
    UserPort,
};

use crate::error::DatabaseError;
use crate::repositories::billing::{BillingRow, NewBillingRow};
use crate::repositories::payment::{NewPaymentRow, PaymentRow};
use crate::repositories::user::UserRow;
use crate::repositories::{BillingRepository, PaymentRepository, UserRepository};

/// PostgreSQL-backed implementation of the ledger ports
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - `OutOfRange` and `CheckViolation` -> `PortError::Validation`
/// - connection failures -> `PortError::Connection`
/// - anything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresLedgerAdapter {
    users: UserRepository,
    billings: BillingRepository,
    payments: PaymentRepository,
    pool: PgPool,
}

impl PostgresLedgerAdapter {
    /// Creates a new PostgreSQL ledger adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            billings: BillingRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresLedgerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLedgerAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-ledger-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-ledger-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl UserPort for PostgresLedgerAdapter {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        debug!("Fetching user by ID");
        let row = self.users.find_by_id(id.value()).await.map_err(db_to_port_error)?;
        Ok(row.map(row_to_user))
    }

    #[instrument(skip(self))]
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, PortError> {
        debug!("Fetching user by name");
        let row = self.users.find_by_name(name).await.map_err(db_to_port_error)?;
        Ok(row.map(row_to_user))
    }

    #[instrument(skip(self))]
    async fn insert_user(&self, name: &str) -> Result<User, PortError> {
        let row = self.users.insert(name).await.map_err(db_to_port_error)?;
        debug!(user_id = row.id, "Inserted user");
        Ok(row_to_user(row))
    }
}

#[async_trait]
impl BillingPort for PostgresLedgerAdapter {
    #[instrument(skip(self), fields(billing_id = %id))]
    async fn find_billing_by_id(&self, id: BillingId) -> Result<Option<Billing>, PortError> {
        debug!("Fetching billing by ID");
        let row = self.billings.find_by_id(id.value()).await.map_err(db_to_port_error)?;
        Ok(row.map(row_to_billing))
    }

    #[instrument(skip(self))]
    async fn find_billing_by_pair(&self, pair: BillingPair) -> Result<Option<Billing>, PortError> {
        let row = self
            .billings
            .find_by_pair(pair.payer_id().value(), pair.receiver_id().value())
            .await
            .map_err(db_to_port_error)?;
        Ok(row.map(row_to_billing))
    }

    #[instrument(skip(self, billing), fields(payer_id = %billing.pair.payer_id(), receiver_id = %billing.pair.receiver_id()))]
    async fn try_insert_billing(&self, billing: NewBilling) -> Result<Option<Billing>, PortError> {
        let row = self
            .billings
            .insert_if_absent(NewBillingRow {
                payer_id: billing.pair.payer_id().value(),
                receiver_id: billing.pair.receiver_id().value(),
                created_at: billing.created_at,
            })
            .await
            .map_err(db_to_port_error)?;
        Ok(row.map(row_to_billing))
    }
}

#[async_trait]
impl PaymentPort for PostgresLedgerAdapter {
    #[instrument(skip(self, payment), fields(billing_id = %payment.billing_id, amount = payment.amount))]
    async fn record_payment(&self, payment: NewPayment) -> Result<(Payment, Billing), PortError> {
        let (payment_row, billing_row) = self
            .payments
            .insert_and_accrue(NewPaymentRow {
                payer_id: payment.payer_id.value(),
                billing_id: payment.billing_id.value(),
                amount: payment.amount,
                created_at: payment.created_at,
            })
            .await
            .map_err(db_to_port_error)?;

        debug!(payment_id = payment_row.id, total = billing_row.amount, "Payment stored");
        Ok((row_to_payment(payment_row), row_to_billing(billing_row)))
    }

    #[instrument(skip(self), fields(billing_id = %billing_id))]
    async fn list_payments_by_billing(&self, billing_id: BillingId) -> Result<Vec<Payment>, PortError> {
        let rows = self
            .payments
            .find_by_billing(billing_id.value())
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_payment).collect())
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

/// Converts a database error to a port error
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound(msg) => PortError::NotFound {
            entity_type: "record".to_string(),
            id: msg,
        },
        DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
        DatabaseError::OutOfRange(msg) | DatabaseError::CheckViolation(msg) => PortError::validation(msg),
        DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => PortError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        },
        other => PortError::Internal {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::new(row.id),
        name: row.name,
    }
}

fn row_to_billing(row: BillingRow) -> Billing {
    Billing {
        id: BillingId::new(row.id),
        payer_id: UserId::new(row.payer_id),
        receiver_id: UserId::new(row.receiver_id),
        amount: row.amount,
        created_at: row.created_at,
    }
}

fn row_to_payment(row: PaymentRow) -> Payment {
    Payment {
        id: PaymentId::new(row.id),
        payer_id: UserId::new(row.payer_id),
        billing_id: BillingId::new(row.billing_id),
        amount: row.amount,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let port_error = db_to_port_error(DatabaseError::duplicate("User", "name", "Ana"));
        assert!(port_error.is_conflict());
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let port_error = db_to_port_error(DatabaseError::not_found("Billing", 3));
        assert!(port_error.is_not_found());
    }

    #[test]
    fn test_out_of_range_maps_to_validation() {
        let port_error = db_to_port_error(DatabaseError::OutOfRange("billing 1 total would overflow".into()));
        assert!(matches!(port_error, PortError::Validation { ref message, .. } if message.contains("overflow")));
    }

    #[test]
    fn test_pool_exhaustion_is_transient() {
        let port_error = db_to_port_error(DatabaseError::PoolExhausted);
        assert!(port_error.is_transient());
    }

    #[test]
    fn test_row_conversion_keeps_fields() {
        let now = Utc::now();
        let billing = row_to_billing(BillingRow {
            id: 4,
            payer_id: 1,
            receiver_id: 2,
            amount: 150,
            created_at: now,
        });
        assert_eq!(billing.id, BillingId::new(4));
        assert_eq!(billing.pair().payer_id(), UserId::new(1));
        assert_eq!(billing.amount, 150);
        assert_eq!(billing.created_at, now);
    }
}
