//! Registered users

use serde::{Deserialize, Serialize};

use core_kernel::UserId;
use crate::error::LedgerError;

/// Longest accepted user name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// A registered user
///
/// Users are created once and never mutated or deleted. The name is
/// unique across the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique display name
    pub name: String,
}

/// Checks that a requested user name is usable
///
/// # Errors
///
/// Returns `LedgerError::InvalidInput` for blank names or names longer
/// than [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput("name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(LedgerError::InvalidInput(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ana").is_ok());
        assert!(matches!(validate_name(""), Err(LedgerError::InvalidInput(_))));
        assert!(matches!(validate_name("   "), Err(LedgerError::InvalidInput(_))));
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
