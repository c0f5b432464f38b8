//! Payment repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;
use crate::repositories::billing::BillingRow;

/// Repository for the `payments` table
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a payment and accrues it onto its billing in one transaction
    ///
    /// The billing row is incremented in place (`amount = amount + $n`),
    /// which takes a row lock, so concurrent payments against the same
    /// billing serialize instead of overwriting each other's total.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the billing does not exist and
    /// `DatabaseError::OutOfRange` if the total would overflow `BIGINT`. In
    /// both cases the transaction is rolled back and no payment is stored.
    pub async fn insert_and_accrue(
        &self,
        payment: NewPaymentRow,
    ) -> Result<(PaymentRow, BillingRow), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let billing = sqlx::query_as::<_, BillingRow>(
            r#"
            UPDATE billings
            SET amount = amount + $2
            WHERE id = $1
            RETURNING id, payer_id, receiver_id, amount, created_at
            "#,
        )
        .bind(payment.billing_id)
        .bind(payment.amount)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::OutOfRange(_) => DatabaseError::OutOfRange(format!(
                "billing {} total would overflow",
                payment.billing_id
            )),
            other => other,
        })?
        .ok_or_else(|| DatabaseError::not_found("Billing", payment.billing_id))?;

        let stored = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payments (payer_id, billing_id, amount, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, payer_id, billing_id, amount, created_at
            "#,
        )
        .bind(payment.payer_id)
        .bind(payment.billing_id)
        .bind(payment.amount)
        .bind(payment.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((stored, billing))
    }

    /// Lists payments for a billing in insertion order
    pub async fn find_by_billing(&self, billing_id: i64) -> Result<Vec<PaymentRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, payer_id, billing_id, amount, created_at
            FROM payments
            WHERE billing_id = $1
            ORDER BY id
            "#,
        )
        .bind(billing_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for a payment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub payer_id: i64,
    pub billing_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new payment
#[derive(Debug, Clone)]
pub struct NewPaymentRow {
    pub payer_id: i64,
    pub billing_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
