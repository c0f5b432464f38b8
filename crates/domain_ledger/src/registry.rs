//! User registry service

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::UserId;
use crate::error::LedgerError;
use crate::ports::UserPort;
use crate::user::{validate_name, User};

/// Creates and looks up users
///
/// Name uniqueness is checked with a lookup before the insert. The
/// PostgreSQL adapter also holds a unique constraint, so a concurrent
/// duplicate that slips past the lookup is still reported as
/// `AlreadyExists`.
#[derive(Clone)]
pub struct UserRegistry {
    users: Arc<dyn UserPort>,
}

impl UserRegistry {
    /// Creates a registry backed by the given user port
    pub fn new(users: Arc<dyn UserPort>) -> Self {
        Self { users }
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the name is blank or too long
    /// - `AlreadyExists` if the name is taken
    /// - `Persistence` if the store fails
    pub async fn create_user(&self, name: &str) -> Result<User, LedgerError> {
        validate_name(name)?;

        match self.get_user_by_name(name).await {
            Ok(_) => {
                warn!(name, "Rejected duplicate user name");
                return Err(LedgerError::AlreadyExists(name.to_string()));
            }
            Err(LedgerError::UserNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let user = self.users.insert_user(name).await.map_err(|e| {
            if e.is_conflict() {
                LedgerError::AlreadyExists(name.to_string())
            } else {
                LedgerError::Persistence(e)
            }
        })?;

        info!(user_id = %user.id, name = %user.name, "User created");
        Ok(user)
    }

    /// Fetches a user by ID
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no user has this ID
    pub async fn get_user_by_id(&self, id: UserId) -> Result<User, LedgerError> {
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(format!("id {}", id)))
    }

    /// Fetches a user by exact name
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no user has this name
    pub async fn get_user_by_name(&self, name: &str) -> Result<User, LedgerError> {
        debug!(name, "Looking up user by name");
        self.users
            .find_user_by_name(name)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(format!("name '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedgerStore;

    fn registry(store: &InMemoryLedgerStore) -> UserRegistry {
        UserRegistry::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let store = InMemoryLedgerStore::new();
        let registry = registry(&store);

        let ana = registry.create_user("Ana").await.unwrap();
        assert_eq!(ana.name, "Ana");

        let fetched = registry.get_user_by_id(ana.id).await.unwrap();
        assert_eq!(fetched, ana);
        assert_eq!(registry.get_user_by_name("Ana").await.unwrap(), ana);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = InMemoryLedgerStore::new();
        let registry = registry(&store);

        registry.create_user("Antonio").await.unwrap();
        let err = registry.create_user("Antonio").await.unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyExists(name) if name == "Antonio"));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = InMemoryLedgerStore::new();
        let err = registry(&store).create_user("  ").await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_user() {
        let store = InMemoryLedgerStore::new();
        let registry = registry(&store);

        let err = registry.get_user_by_id(UserId::new(7)).await.unwrap_err();
        assert!(matches!(err, LedgerError::UserNotFound(_)));
        assert!(err.is_not_found());

        let err = registry.get_user_by_name("Nobody").await.unwrap_err();
        assert!(matches!(err, LedgerError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let store = InMemoryLedgerStore::new();
        store.set_unavailable(true);
        let err = registry(&store).create_user("Ana").await.unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
    }
}
