//! Pre-built Test Fixtures
//!
//! Well-known users and stores seeded with them. Ids are assigned in
//! insertion order starting at 1, so `ANA` is always user 1.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::UserId;
use domain_ledger::memory::InMemoryLedgerStore;
use domain_ledger::LedgerServices;

/// Fixture for the users every scenario starts with
pub struct UserFixtures;

impl UserFixtures {
    pub const ANA: &'static str = "Ana";
    pub const BRUNO: &'static str = "Bruno";
    pub const CARLA: &'static str = "Carla";

    /// Names seeded by [`seeded_store`], in id order
    pub fn names() -> [&'static str; 3] {
        [Self::ANA, Self::BRUNO, Self::CARLA]
    }

    pub fn ana_id() -> UserId {
        UserId::new(1)
    }

    pub fn bruno_id() -> UserId {
        UserId::new(2)
    }

    pub fn carla_id() -> UserId {
        UserId::new(3)
    }

    /// An id no seeded store ever assigns
    pub fn unknown_id() -> UserId {
        UserId::new(999)
    }
}

/// Fixture for fixed timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Jan 1, 2024 at midnight UTC
    pub fn ledger_epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Creates an in-memory store holding Ana (1), Bruno (2) and Carla (3)
pub async fn seeded_store() -> InMemoryLedgerStore {
    InMemoryLedgerStore::with_users(&UserFixtures::names()).await
}

/// Creates ledger services over a freshly seeded store
///
/// The store handle is returned too, for direct inspection and fault
/// injection.
pub async fn seeded_services() -> (InMemoryLedgerStore, LedgerServices) {
    let store = seeded_store().await;
    let services = LedgerServices::new(Arc::new(store.clone()));
    (store, services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_ledger::UserPort;

    #[tokio::test]
    async fn test_seeded_ids_match_fixtures() {
        let store = seeded_store().await;
        let ana = store.find_user_by_id(UserFixtures::ana_id()).await.unwrap().unwrap();
        let carla = store.find_user_by_id(UserFixtures::carla_id()).await.unwrap().unwrap();
        assert_eq!(ana.name, UserFixtures::ANA);
        assert_eq!(carla.name, UserFixtures::CARLA);
        assert!(store.find_user_by_id(UserFixtures::unknown_id()).await.unwrap().is_none());
    }
}
