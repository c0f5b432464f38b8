//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating ledger inputs.

use core_kernel::UserId;
use proptest::prelude::*;

/// Strategy for valid payment amounts
pub fn positive_amount_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Strategy for amounts every payment must reject
pub fn non_positive_amount_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![Just(0i64), Just(i64::MIN), i64::MIN..0i64]
}

/// Strategy for a sequence of valid payments
pub fn payment_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(positive_amount_strategy(), 0..max_len)
}

/// Strategy for names the registry accepts
pub fn user_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,30}[A-Za-z]"
}

/// Strategy for names made only of whitespace
pub fn blank_name_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,10}"
}

/// Strategy for an ordered pair of distinct seeded users (ids 1 to 3)
pub fn seeded_pair_strategy() -> impl Strategy<Value = (UserId, UserId)> {
    (1i64..=3, 1i64..=3)
        .prop_filter("payer and receiver differ", |(a, b)| a != b)
        .prop_map(|(a, b)| (UserId::new(a), UserId::new(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_amounts_are_positive(amount in positive_amount_strategy()) {
            prop_assert!(amount > 0);
        }

        #[test]
        fn generated_rejections_are_non_positive(amount in non_positive_amount_strategy()) {
            prop_assert!(amount <= 0);
        }

        #[test]
        fn generated_names_are_not_blank(name in user_name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }

        #[test]
        fn generated_pairs_are_distinct((payer, receiver) in seeded_pair_strategy()) {
            prop_assert_ne!(payer, receiver);
        }
    }
}
