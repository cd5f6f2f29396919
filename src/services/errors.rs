use thiserror::Error;

use crate::domain::vote::VoteError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted form data was rejected.
    #[error("{0}")]
    Form(String),
    /// A value did not satisfy a domain constraint.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// The write clashes with existing data, e.g. a duplicate title.
    #[error("{0}")]
    Conflict(String),
    /// A photo was voted against itself.
    #[error("a photo cannot be voted against itself")]
    InvalidPair,
    /// The two photos of a vote do not share a category.
    #[error("both photos must belong to the same category")]
    CategoryMismatch,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl From<VoteError> for ServiceError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::InvalidPair => ServiceError::InvalidPair,
            VoteError::CategoryMismatch => ServiceError::CategoryMismatch,
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
