//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::{DateTime, Utc};
use core_kernel::{BillingId, UserId};
use domain_ledger::memory::InMemoryLedgerStore;
use domain_ledger::{Billing, LedgerError, LedgerServices};

use crate::fixtures::{seeded_services, TemporalFixtures, UserFixtures};

/// Builder for standalone `Billing` values
pub struct TestBillingBuilder {
    id: BillingId,
    payer_id: UserId,
    receiver_id: UserId,
    amount: i64,
    created_at: DateTime<Utc>,
}

impl Default for TestBillingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillingBuilder {
    /// Creates a builder for an empty Ana -> Bruno billing
    pub fn new() -> Self {
        Self {
            id: BillingId::new(1),
            payer_id: UserFixtures::ana_id(),
            receiver_id: UserFixtures::bruno_id(),
            amount: 0,
            created_at: TemporalFixtures::ledger_epoch(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = BillingId::new(id);
        self
    }

    pub fn with_pair(mut self, payer_id: UserId, receiver_id: UserId) -> Self {
        self.payer_id = payer_id;
        self.receiver_id = receiver_id;
        self
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> Billing {
        Billing {
            id: self.id,
            payer_id: self.payer_id,
            receiver_id: self.receiver_id,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// Builds a seeded ledger with billings and payments already recorded
///
/// # Example
///
/// ```rust,ignore
/// let scenario = LedgerScenarioBuilder::new()
///     .billing(UserFixtures::ana_id(), UserFixtures::bruno_id(), &[10, 20])
///     .build()
///     .await?;
/// assert_eq!(scenario.billings[0].amount, 30);
/// ```
#[derive(Default)]
pub struct LedgerScenarioBuilder {
    billings: Vec<(UserId, UserId, Vec<i64>)>,
}

/// The result of [`LedgerScenarioBuilder::build`]
pub struct LedgerScenario {
    pub store: InMemoryLedgerStore,
    pub services: LedgerServices,
    /// Billings in declaration order, with their accrued totals
    pub billings: Vec<Billing>,
}

impl LedgerScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a billing for the ordered pair with the given payments
    pub fn billing(mut self, payer_id: UserId, receiver_id: UserId, payments: &[i64]) -> Self {
        self.billings.push((payer_id, receiver_id, payments.to_vec()));
        self
    }

    /// Seeds a store and replays the declared billings through the services
    pub async fn build(self) -> Result<LedgerScenario, LedgerError> {
        let (store, services) = seeded_services().await;

        let mut billings = Vec::with_capacity(self.billings.len());
        for (payer_id, receiver_id, payments) in self.billings {
            let billing = services.billings.get_or_create_billing(payer_id, receiver_id).await?;
            for amount in payments {
                services.payments.create_payment(billing.id, amount).await?;
            }
            billings.push(services.billings.get_billing_by_id(billing.id).await?);
        }

        Ok(LedgerScenario { store, services, billings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_builder_defaults() {
        let billing = TestBillingBuilder::new().with_amount(25).build();
        assert_eq!(billing.payer_id, UserFixtures::ana_id());
        assert_eq!(billing.receiver_id, UserFixtures::bruno_id());
        assert_eq!(billing.amount, 25);
    }

    #[tokio::test]
    async fn test_scenario_accrues_declared_payments() {
        let scenario = LedgerScenarioBuilder::new()
            .billing(UserFixtures::ana_id(), UserFixtures::bruno_id(), &[10, 20, 30])
            .billing(UserFixtures::bruno_id(), UserFixtures::ana_id(), &[])
            .build()
            .await
            .unwrap();

        assert_eq!(scenario.billings.len(), 2);
        assert_eq!(scenario.billings[0].amount, 60);
        assert_eq!(scenario.billings[1].amount, 0);
        assert_eq!(scenario.store.payment_count().await, 3);
    }
}
