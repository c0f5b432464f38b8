//! End-to-end tests for the ledger services over the in-memory store

use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{BillingId, UserId};
use domain_ledger::memory::InMemoryLedgerStore;
use domain_ledger::{LedgerError, LedgerServices};
use test_utils::{
    assert_billing_balanced, assert_ledger_err, non_positive_amount_strategy,
    payment_sequence_strategy, seeded_services, LedgerScenarioBuilder, UserFixtures,
};

fn ana() -> UserId {
    UserFixtures::ana_id()
}

fn bruno() -> UserId {
    UserFixtures::bruno_id()
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[tokio::test]
    async fn test_full_payment_flow() {
        let store = InMemoryLedgerStore::new();
        let services = LedgerServices::new(Arc::new(store.clone()));

        let ana = services.users.create_user("Ana").await.unwrap();
        let bruno = services.users.create_user("Bruno").await.unwrap();
        assert_eq!(ana.id, UserId::new(1));
        assert_eq!(bruno.id, UserId::new(2));

        let billing = services.billings.get_or_create_billing(ana.id, bruno.id).await.unwrap();
        assert_eq!(billing.amount, 0);

        let payment = services.payments.create_payment(billing.id, 150).await.unwrap();
        assert_eq!(payment.amount, 150);
        assert_eq!(payment.payer_id, ana.id);

        let refreshed = services.billings.get_billing_by_id(billing.id).await.unwrap();
        assert_eq!(refreshed.amount, 150);
        assert_billing_balanced(&store, billing.id).await;
    }

    #[tokio::test]
    async fn test_directions_are_independent() {
        let scenario = LedgerScenarioBuilder::new()
            .billing(ana(), bruno(), &[100])
            .billing(bruno(), ana(), &[80])
            .build()
            .await
            .unwrap();

        let (forward, backward) = (&scenario.billings[0], &scenario.billings[1]);
        assert_ne!(forward.id, backward.id);
        assert_eq!(forward.amount, 100);
        assert_eq!(backward.amount, 80);
    }

    #[tokio::test]
    async fn test_sequential_payments_sum() {
        let scenario = LedgerScenarioBuilder::new()
            .billing(ana(), bruno(), &[10, 20, 30])
            .build()
            .await
            .unwrap();
        assert_eq!(scenario.billings[0].amount, 60);
        assert_billing_balanced(&scenario.store, scenario.billings[0].id).await;
    }

    #[tokio::test]
    async fn test_duplicate_user_name() {
        let services = LedgerServices::new(Arc::new(InMemoryLedgerStore::new()));
        services.users.create_user("Antonio").await.unwrap();
        assert_ledger_err!(
            services.users.create_user("Antonio").await,
            LedgerError::AlreadyExists(_)
        );
    }

    #[tokio::test]
    async fn test_repeat_get_does_not_reset_amount() {
        let scenario = LedgerScenarioBuilder::new()
            .billing(ana(), bruno(), &[40])
            .build()
            .await
            .unwrap();
        let billing = &scenario.billings[0];

        let again = scenario
            .services
            .billings
            .get_or_create_billing(ana(), bruno())
            .await
            .unwrap();
        assert_eq!(again.id, billing.id);
        assert_eq!(again.amount, 40);
        assert_eq!(again.created_at, billing.created_at);
    }

    #[tokio::test]
    async fn test_unknown_payer_hides_receiver_problem() {
        let (_, services) = seeded_services().await;
        assert_ledger_err!(
            services
                .billings
                .get_or_create_billing(UserId::new(10), UserId::new(20))
                .await,
            LedgerError::PayerNotFound(_)
        );
    }

    #[tokio::test]
    async fn test_missing_billing_regardless_of_amount() {
        let (_, services) = seeded_services().await;
        for amount in [-3, 0, 5] {
            assert_ledger_err!(
                services.payments.create_payment(BillingId::new(900), amount).await,
                LedgerError::BillingNotFound(_)
            );
        }
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_payments_keep_total_consistent() {
        let (store, services) = seeded_services().await;
        let billing = services.billings.get_or_create_billing(ana(), bruno()).await.unwrap();

        let billing_id = billing.id;
        let mut handles = Vec::new();
        for amount in 1..=50_i64 {
            let services = services.clone();
            handles.push(tokio::spawn(async move {
                services.payments.create_payment(billing_id, amount).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.payment_count().await, 50);
        assert_billing_balanced(&store, billing_id).await;

        let billing = services.billings.get_billing_by_id(billing_id).await.unwrap();
        assert_eq!(billing.amount, (1..=50).sum::<i64>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_billing() {
        let (store, services) = seeded_services().await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let services = services.clone();
            handles.push(tokio::spawn(async move {
                services.billings.get_or_create_billing(ana(), bruno()).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.dedup();

        assert_eq!(ids.len(), 1);
        assert_eq!(store.billing_count().await, 1);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn accrued_total_equals_sum_of_payments(amounts in payment_sequence_strategy(20)) {
        let rt = runtime();
        let total = rt.block_on(async {
            let scenario = LedgerScenarioBuilder::new()
                .billing(ana(), bruno(), &amounts)
                .build()
                .await
                .unwrap();
            assert_billing_balanced(&scenario.store, scenario.billings[0].id).await;
            scenario.billings[0].amount
        });
        prop_assert_eq!(total, amounts.iter().sum::<i64>());
    }

    #[test]
    fn non_positive_amounts_never_change_total(amount in non_positive_amount_strategy()) {
        let rt = runtime();
        let (err, total) = rt.block_on(async {
            let (_, services) = seeded_services().await;
            let billing = services.billings.get_or_create_billing(ana(), bruno()).await.unwrap();
            let err = services.payments.create_payment(billing.id, amount).await.unwrap_err();
            let billing = services.billings.get_billing_by_id(billing.id).await.unwrap();
            (err, billing.amount)
        });
        prop_assert!(matches!(err, LedgerError::InvalidAmount(_)));
        prop_assert_eq!(total, 0);
    }

    #[test]
    fn self_billing_is_always_invalid(raw in any::<i64>()) {
        let rt = runtime();
        let err = rt.block_on(async {
            let (_, services) = seeded_services().await;
            services
                .billings
                .get_or_create_billing(UserId::new(raw), UserId::new(raw))
                .await
                .unwrap_err()
        });
        prop_assert!(matches!(err, LedgerError::InvalidPair(_)));
    }
}
