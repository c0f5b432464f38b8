//! Billing repository implementation
//!
//! Each row is the running total for one ordered (payer, receiver) pair.
//! The `billings_pair_key` unique constraint guarantees one row per pair.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for the `billings` table
#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    /// Creates a new BillingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a billing by ID, or `None` if absent
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BillingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BillingRow>(
            r#"
            SELECT id, payer_id, receiver_id, amount, created_at
            FROM billings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the billing for exactly this ordered pair
    pub async fn find_by_pair(
        &self,
        payer_id: i64,
        receiver_id: i64,
    ) -> Result<Option<BillingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BillingRow>(
            r#"
            SELECT id, payer_id, receiver_id, amount, created_at
            FROM billings
            WHERE payer_id = $1 AND receiver_id = $2
            "#,
        )
        .bind(payer_id)
        .bind(receiver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a zero-total billing unless the pair already has one
    ///
    /// # Returns
    ///
    /// The new row, or `None` if the pair's unique key already existed
    pub async fn insert_if_absent(
        &self,
        billing: NewBillingRow,
    ) -> Result<Option<BillingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BillingRow>(
            r#"
            INSERT INTO billings (payer_id, receiver_id, amount, created_at)
            VALUES ($1, $2, 0, $3)
            ON CONFLICT (payer_id, receiver_id) DO NOTHING
            RETURNING id, payer_id, receiver_id, amount, created_at
            "#,
        )
        .bind(billing.payer_id)
        .bind(billing.receiver_id)
        .bind(billing.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row for a billing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BillingRow {
    pub id: i64,
    pub payer_id: i64,
    pub receiver_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new billing
#[derive(Debug, Clone)]
pub struct NewBillingRow {
    pub payer_id: i64,
    pub receiver_id: i64,
    pub created_at: DateTime<Utc>,
}
