//! Database error types
//!
//! SQLx errors are sorted by PostgreSQL SQLSTATE as they enter this crate,
//! so the adapter can tell a taken name from an overflowing total or a lost
//! connection.

use thiserror::Error;

/// Errors raised by the pool, the migrations, or a repository query
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// No connection became free before the acquire timeout
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    /// `23505`: a unique key such as `users_name_key` rejected the write
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// `23503`: the referenced user or billing row is missing
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// `23514`: a `CHECK` constraint on `billings` or `payments` failed
    #[error("Check violation: {0}")]
    CheckViolation(String),

    /// `22003`: an arithmetic result left the `BIGINT` range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// `40001` / `40P01`: the transaction lost a serialization race or deadlocked
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Billing", 42);
    /// assert_eq!(error.to_string(), "Entity not found: Billing 42");
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} {}", entity, id))
    }

    /// Creates a duplicate entry error naming the conflicting value
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!("{} {} '{}' is taken", entity, field, value))
    }

    fn from_sqlstate(code: &str, message: String) -> Self {
        match code {
            "23505" => DatabaseError::DuplicateEntry(message),
            "23503" => DatabaseError::ForeignKeyViolation(message),
            "23514" => DatabaseError::CheckViolation(message),
            "22003" => DatabaseError::OutOfRange(message),
            "40001" | "40P01" => DatabaseError::TransactionAborted(message),
            _ => DatabaseError::QueryFailed(message),
        }
    }
}

/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code() {
                    Some(code) => DatabaseError::from_sqlstate(code.as_ref(), message),
                    None => DatabaseError::QueryFailed(message),
                }
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlstate_classification() {
        let classified = |code| DatabaseError::from_sqlstate(code, "boom".to_string());

        assert!(matches!(classified("23505"), DatabaseError::DuplicateEntry(_)));
        assert!(matches!(classified("23514"), DatabaseError::CheckViolation(_)));
        assert!(matches!(classified("22003"), DatabaseError::OutOfRange(_)));
        assert!(matches!(classified("40P01"), DatabaseError::TransactionAborted(_)));
        assert!(matches!(classified("42P01"), DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(DatabaseError::from(sqlx::Error::PoolTimedOut), DatabaseError::PoolExhausted));
        assert!(matches!(
            DatabaseError::from(sqlx::Error::PoolClosed),
            DatabaseError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_duplicate_message() {
        let error = DatabaseError::duplicate("User", "name", "Ana");
        assert_eq!(error.to_string(), "Duplicate entry: User name 'Ana' is taken");
    }
}
