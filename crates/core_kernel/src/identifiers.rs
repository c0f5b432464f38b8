//! Strongly-typed identifiers for ledger entities
//!
//! Every persisted entity is keyed by a store-assigned 64-bit integer.
//! Newtype wrappers keep a `UserId` from being passed where a `BillingId`
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store-assigned identifier
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the entity name used in log and error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(UserId, "User");
define_id!(BillingId, "Billing");
define_id!(PaymentId, "Payment");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(UserId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: BillingId = " 7 ".parse().unwrap();
        assert_eq!(parsed, BillingId::new(7));
        assert!("seven".parse::<BillingId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&PaymentId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
