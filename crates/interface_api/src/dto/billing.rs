//! Billing DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use core_kernel::UserId;
use domain_ledger::{Billing, LedgerError};

/// Raw `payer_id`/`receiver_id` query values
///
/// Kept as strings so the handler decides between loose and strict parsing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillingQuery {
    /// User who owes; must differ from `receiver_id`
    #[param(value_type = Option<i64>)]
    pub payer_id: Option<String>,
    /// User who is owed
    #[param(value_type = Option<i64>)]
    pub receiver_id: Option<String>,
}

impl BillingQuery {
    /// Builds the query from raw key/value pairs
    ///
    /// The first value of a repeated key wins. Strict mode rejects the
    /// repetition instead. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>, strict: bool) -> Result<Self, LedgerError> {
        let mut query = BillingQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "payer_id" => &mut query.payer_id,
                "receiver_id" => &mut query.receiver_id,
                _ => continue,
            };
            match slot {
                None => *slot = Some(value),
                Some(_) if strict => {
                    return Err(LedgerError::InvalidInput(format!(
                        "{} given more than once",
                        key
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(query)
    }

    /// Resolves both ids
    ///
    /// Loose mode reads anything absent or non-numeric as 0. Strict mode
    /// rejects it with `InvalidInput`.
    pub fn ids(&self, strict: bool) -> Result<(UserId, UserId), LedgerError> {
        Ok((
            parse_id("payer_id", self.payer_id.as_deref(), strict)?,
            parse_id("receiver_id", self.receiver_id.as_deref(), strict)?,
        ))
    }
}

fn parse_id(field: &str, raw: Option<&str>, strict: bool) -> Result<UserId, LedgerError> {
    match raw.map(str::parse::<UserId>) {
        Some(Ok(id)) => Ok(id),
        _ if !strict => Ok(UserId::new(0)),
        Some(Err(_)) => Err(LedgerError::InvalidInput(format!("{} must be an integer", field))),
        None => Err(LedgerError::InvalidInput(format!("{} is required", field))),
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct BillingResponse {
    pub id: i64,
    pub payer_id: i64,
    pub receiver_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Billing> for BillingResponse {
    fn from(billing: Billing) -> Self {
        Self {
            id: billing.id.value(),
            payer_id: billing.payer_id.value(),
            receiver_id: billing.receiver_id.value(),
            amount: billing.amount,
            created_at: billing.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(payer: Option<&str>, receiver: Option<&str>) -> BillingQuery {
        BillingQuery {
            payer_id: payer.map(String::from),
            receiver_id: receiver.map(String::from),
        }
    }

    #[test]
    fn test_loose_parsing_defaults_to_zero() {
        let (payer, receiver) = query(Some("abc"), None).ids(false).unwrap();
        assert_eq!(payer, UserId::new(0));
        assert_eq!(receiver, UserId::new(0));
    }

    #[test]
    fn test_strict_parsing_rejects_garbage() {
        let err = query(Some("1"), Some("x")).ids(true).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(msg) if msg.contains("receiver_id")));

        let err = query(None, Some("2")).ids(true).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(msg) if msg.contains("payer_id")));
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_repeated_value_wins_when_loose() {
        let raw = pairs(&[("payer_id", "1"), ("payer_id", "3"), ("receiver_id", "2"), ("page", "4")]);
        let query = BillingQuery::from_pairs(raw, false).unwrap();
        assert_eq!(query.ids(false).unwrap(), (UserId::new(1), UserId::new(2)));
    }

    #[test]
    fn test_repeated_key_rejected_when_strict() {
        let raw = pairs(&[("receiver_id", "2"), ("receiver_id", "2"), ("payer_id", "1")]);
        let err = BillingQuery::from_pairs(raw, true).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(msg) if msg == "receiver_id given more than once"));
    }

    #[test]
    fn test_numeric_ids_parse_in_both_modes() {
        for strict in [false, true] {
            let ids = query(Some("1"), Some("2")).ids(strict).unwrap();
            assert_eq!(ids, (UserId::new(1), UserId::new(2)));
        }
    }
}
