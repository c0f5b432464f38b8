//! Custom Test Assertions
//!
//! Assertion helpers for ledger invariants with messages that name the
//! billing involved.

use core_kernel::BillingId;
use domain_ledger::{BillingPort, PaymentPort};

/// Asserts that a billing's total equals the sum of its payments
///
/// # Panics
///
/// Panics if the billing is missing, the store fails, or the totals differ
pub async fn assert_billing_balanced<S>(store: &S, billing_id: BillingId)
where
    S: BillingPort + PaymentPort,
{
    let billing = store
        .find_billing_by_id(billing_id)
        .await
        .unwrap_or_else(|e| panic!("Store failed reading billing {}: {}", billing_id, e))
        .unwrap_or_else(|| panic!("Billing {} does not exist", billing_id));

    let payments = store
        .list_payments_by_billing(billing_id)
        .await
        .unwrap_or_else(|e| panic!("Store failed listing payments of {}: {}", billing_id, e));

    let sum: i64 = payments.iter().map(|p| p.amount).sum();
    assert_eq!(
        billing.amount, sum,
        "Billing {} total {} does not match sum of {} payments ({})",
        billing_id,
        billing.amount,
        payments.len(),
        sum
    );

    for payment in &payments {
        assert_eq!(
            payment.payer_id, billing.payer_id,
            "Payment {} payer differs from billing {} payer",
            payment.id, billing_id
        );
    }
}

/// Asserts that a result failed with the given `LedgerError` pattern
#[macro_export]
macro_rules! assert_ledger_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err(ref e) if matches!(e, $pattern) => {}
            Err(e) => panic!("Expected {}, got error {:?}", stringify!($pattern), e),
            Ok(v) => panic!("Expected {}, got Ok({:?})", stringify!($pattern), v),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::LedgerScenarioBuilder;
    use crate::fixtures::UserFixtures;
    use domain_ledger::LedgerError;

    #[tokio::test]
    async fn test_balanced_after_payments() {
        let scenario = LedgerScenarioBuilder::new()
            .billing(UserFixtures::ana_id(), UserFixtures::carla_id(), &[5, 7])
            .build()
            .await
            .unwrap();
        assert_billing_balanced(&scenario.store, scenario.billings[0].id).await;
    }

    #[test]
    fn test_ledger_err_macro_matches() {
        let result: Result<(), LedgerError> = Err(LedgerError::InvalidAmount(0));
        assert_ledger_err!(result, LedgerError::InvalidAmount(_));
    }
}
