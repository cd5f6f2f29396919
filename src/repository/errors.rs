use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::vote::VoteError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Query or transaction failure reported by Diesel.
    #[error("database error: {0}")]
    Database(DieselError),
    /// No connection could be taken from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A stored row could not be converted into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// A unique constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A vote no longer satisfies its rules at write time.
    #[error("vote rejected: {0}")]
    Vote(#[from] VoteError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict(info.message().to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
