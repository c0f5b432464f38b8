//! Unit tests for the integer identifier newtypes

use core_kernel::{BillingId, PaymentId, UserId};
use proptest::prelude::*;

mod user_id_tests {
    use super::*;

    #[test]
    fn test_value_and_conversions() {
        let id = UserId::new(5);
        assert_eq!(id.value(), 5);
        assert_eq!(i64::from(id), 5);
        assert_eq!(UserId::from(5), id);
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(UserId::entity(), "User");
        assert_eq!(BillingId::entity(), "Billing");
        assert_eq!(PaymentId::entity(), "Payment");
    }

    #[test]
    fn test_from_str_rejects_non_numeric() {
        assert!("abc".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
        assert!("1.5".parse::<UserId>().is_err());
    }

    #[test]
    fn test_ordering_follows_integer_order() {
        assert!(UserId::new(1) < UserId::new(2));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_from_bare_integer() {
        let id: BillingId = serde_json::from_str("17").unwrap();
        assert_eq!(id, BillingId::new(17));
    }

    #[test]
    fn test_deserialize_rejects_string() {
        assert!(serde_json::from_str::<BillingId>("\"17\"").is_err());
    }
}

proptest! {
    #[test]
    fn display_output_parses_back(raw in any::<i64>()) {
        let id = PaymentId::new(raw);
        let parsed: PaymentId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
