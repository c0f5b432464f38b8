//! In-memory ledger store
//!
//! Implements all three ledger ports over shared maps behind a single
//! `RwLock`. Every compound operation (get-or-insert, insert-and-accrue)
//! runs under one write guard, so it is atomic with respect to other
//! callers. IDs are assigned sequentially from 1, like a SQL serial column.
//!
//! Cloning the store shares the underlying state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, BillingId, DomainPort, HealthCheckResult, HealthCheckable, PaymentId,
    PortError, UserId,
};

use crate::billing::{Billing, BillingPair, NewBilling};
use crate::error::LedgerError;
use crate::payment::{NewPayment, Payment};
use crate::ports::{BillingPort, PaymentPort, UserPort};
use crate::user::User;

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    billings: BTreeMap<BillingId, Billing>,
    payments: BTreeMap<PaymentId, Payment>,
    last_user_id: i64,
    last_billing_id: i64,
    last_payment_id: i64,
}

/// In-memory implementation of the ledger ports
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<State>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store with users, assigned IDs 1..=n in order
    pub async fn with_users(names: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write().await;
            for name in names {
                state.last_user_id += 1;
                let id = UserId::new(state.last_user_id);
                state.users.insert(id, User { id, name: (*name).to_string() });
            }
        }
        store
    }

    /// Makes every subsequent operation fail with a connection error
    ///
    /// Used to exercise persistence-failure paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored billings
    pub async fn billing_count(&self) -> usize {
        self.state.read().await.billings.len()
    }

    /// Number of stored payments
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    fn ensure_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::connection("in-memory store is unavailable"));
        }
        Ok(())
    }
}

impl DomainPort for InMemoryLedgerStore {}

#[async_trait]
impl HealthCheckable for InMemoryLedgerStore {
    async fn health_check(&self) -> HealthCheckResult {
        let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
            (AdapterHealth::Unhealthy, "store marked unavailable")
        } else {
            (AdapterHealth::Healthy, "in-memory store")
        };

        HealthCheckResult {
            adapter_id: "memory-ledger-store".to_string(),
            status,
            latency_ms: 0,
            message: Some(message.to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl UserPort for InMemoryLedgerStore {
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        self.ensure_available()?;
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, PortError> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.name == name)
            .cloned())
    }

    async fn insert_user(&self, name: &str) -> Result<User, PortError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.name == name) {
            return Err(PortError::conflict(format!("user name '{}' is taken", name)));
        }

        state.last_user_id += 1;
        let user = User {
            id: UserId::new(state.last_user_id),
            name: name.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BillingPort for InMemoryLedgerStore {
    async fn find_billing_by_id(&self, id: BillingId) -> Result<Option<Billing>, PortError> {
        self.ensure_available()?;
        Ok(self.state.read().await.billings.get(&id).cloned())
    }

    async fn find_billing_by_pair(&self, pair: BillingPair) -> Result<Option<Billing>, PortError> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .await
            .billings
            .values()
            .find(|b| b.pair() == pair)
            .cloned())
    }

    async fn try_insert_billing(&self, billing: NewBilling) -> Result<Option<Billing>, PortError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        if state.billings.values().any(|b| b.pair() == billing.pair) {
            return Ok(None);
        }

        state.last_billing_id += 1;
        let created = Billing {
            id: BillingId::new(state.last_billing_id),
            payer_id: billing.pair.payer_id(),
            receiver_id: billing.pair.receiver_id(),
            amount: 0,
            created_at: billing.created_at,
        };
        state.billings.insert(created.id, created.clone());
        Ok(Some(created))
    }
}

#[async_trait]
impl PaymentPort for InMemoryLedgerStore {
    async fn record_payment(&self, payment: NewPayment) -> Result<(Payment, Billing), PortError> {
        self.ensure_available()?;
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let billing = state
            .billings
            .get_mut(&payment.billing_id)
            .ok_or_else(|| PortError::not_found(BillingId::entity(), payment.billing_id))?;

        // Accrue on a copy first so a failed add leaves nothing behind.
        let mut accrued = billing.clone();
        accrued
            .accrue(payment.amount)
            .map_err(|e| match e {
                LedgerError::InvalidInput(message) => PortError::validation_field(message, "amount"),
                other => PortError::validation_field(other.to_string(), "amount"),
            })?;

        state.last_payment_id += 1;
        let stored = Payment {
            id: PaymentId::new(state.last_payment_id),
            payer_id: payment.payer_id,
            billing_id: payment.billing_id,
            amount: payment.amount,
            created_at: payment.created_at,
        };

        *billing = accrued.clone();
        state.payments.insert(stored.id, stored.clone());
        Ok((stored, accrued))
    }

    async fn list_payments_by_billing(&self, billing_id: BillingId) -> Result<Vec<Payment>, PortError> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .await
            .payments
            .values()
            .filter(|p| p.billing_id == billing_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = InMemoryLedgerStore::new();
        let user = store.insert_user("Ana").await.unwrap();
        assert_eq!(user.id, UserId::new(1));

        let by_id = store.find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id, Some(user.clone()));

        let by_name = store.find_user_by_name("Ana").await.unwrap();
        assert_eq!(by_name, Some(user));

        assert!(store.find_user_by_name("Bruno").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_user_conflict() {
        let store = InMemoryLedgerStore::with_users(&["Ana"]).await;
        let err = store.insert_user("Ana").await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_try_insert_billing_once_per_pair() {
        let store = InMemoryLedgerStore::with_users(&["Ana", "Bruno"]).await;
        let pair = BillingPair::new(UserId::new(1), UserId::new(2)).unwrap();

        let first = store.try_insert_billing(NewBilling::now(pair)).await.unwrap();
        assert!(first.is_some());

        let second = store.try_insert_billing(NewBilling::now(pair)).await.unwrap();
        assert!(second.is_none());

        let reversed = store.try_insert_billing(NewBilling::now(pair.reversed())).await.unwrap();
        assert!(reversed.is_some());
        assert_eq!(store.billing_count().await, 2);
    }

    #[tokio::test]
    async fn test_record_payment_missing_billing() {
        let store = InMemoryLedgerStore::new();
        let payment = NewPayment {
            billing_id: BillingId::new(99),
            payer_id: UserId::new(1),
            amount: 10,
            created_at: Utc::now(),
        };
        let err = store.record_payment(payment).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.payment_count().await, 0);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryLedgerStore::new();
        store.set_unavailable(true);
        assert!(store.find_user_by_id(UserId::new(1)).await.unwrap_err().is_transient());
        assert_eq!(store.health_check().await.status, AdapterHealth::Unhealthy);

        store.set_unavailable(false);
        assert!(store.find_user_by_id(UserId::new(1)).await.is_ok());
    }
}
